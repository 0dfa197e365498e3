//! Fetal Monitoring API Server
//!
//! REST API for the monitoring dashboard, plus the pipeline wiring that
//! feeds it: wearable polling, validation, storage, and the emergency
//! monitor.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
pub mod pipeline;
mod rate_limit;
mod routes;

pub use config::ApiSettings;
pub use rate_limit::{create_governor_config, RateLimitConfig};

use storage::Repository;

/// Application state shared across handlers
pub struct AppState {
    /// Storage repository (shared with the pipeline tasks)
    pub repository: Arc<Repository>,
    /// Prometheus render handle, when the recorder is installed
    pub prometheus: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state over a repository
    pub fn new(repository: Arc<Repository>) -> Self {
        Self {
            repository,
            prometheus: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub metrics: SystemMetrics,
}

/// System metrics
#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    pub reading_count: usize,
    pub alert_count: usize,
    pub contact_count: usize,
}

/// Create the application router
pub fn create_router(state: Arc<RwLock<AppState>>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/readings", get(routes::readings::get_readings))
        .route("/api/v1/alerts", get(routes::alerts::get_alerts))
        .route(
            "/api/v1/contacts",
            get(routes::contacts::list_contacts).post(routes::contacts::add_contact),
        )
        .route("/api/v1/contacts/:id", delete(routes::contacts::remove_contact))
        .route(
            "/api/v1/journal",
            get(routes::journal::get_entries).put(routes::journal::upsert_entry),
        )
        .route(
            "/api/v1/settings",
            get(routes::settings::get_settings).put(routes::settings::update_settings),
        )
        .route("/api/v1/stats/weekly", get(routes::stats::weekly_stats))
        .route(
            "/api/v1/pregnancy",
            get(routes::stats::get_pregnancy).post(routes::stats::setup_pregnancy),
        )
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<RwLock<AppState>>>) -> impl IntoResponse {
    let state = state.read().await;
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let contact_count = state.repository.get_contacts().map(|c| c.len()).unwrap_or(0);

    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        metrics: SystemMetrics {
            reading_count: state.repository.reading_count(),
            alert_count: state.repository.alert_count(),
            contact_count,
        },
    };

    Json(response)
}

/// Prometheus metrics handler
async fn metrics_handler(State(state): State<Arc<RwLock<AppState>>>) -> String {
    let state = state.read().await;
    state
        .prometheus
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server with rate limiting applied
pub async fn run_server(addr: &str, state: Arc<RwLock<AppState>>) -> anyhow::Result<()> {
    let governor_config = create_governor_config(&RateLimitConfig::default());
    let app = create_router(state).layer(tower_governor::GovernorLayer {
        config: governor_config,
    });

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
