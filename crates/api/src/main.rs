//! Fetal Monitoring Pipeline Binary

use anyhow::Context;
use api::{pipeline, ApiSettings, AppState};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use storage::Repository;
use tokio::sync::RwLock;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    api::init_logging();

    let settings = ApiSettings::load().context("loading configuration")?;
    info!(
        "Starting pipeline (mock_device={}, band=[{}, {}])",
        settings.mock_device, settings.kick_count_min, settings.kick_count_max
    );

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .context("installing metrics recorder")?;

    let repository = Arc::new(Repository::new());

    let _handles = pipeline::start(&settings, Arc::clone(&repository))
        .await
        .context("starting pipeline")?;

    let mut state = AppState::new(repository);
    state.prometheus = Some(prometheus);

    api::run_server(&settings.bind_addr, Arc::new(RwLock::new(state))).await
}
