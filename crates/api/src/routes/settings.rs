//! User Settings Routes

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::AppState;
use storage::UserSettings;

/// Current user settings
pub async fn get_settings(State(state): State<Arc<RwLock<AppState>>>) -> Json<UserSettings> {
    let state = state.read().await;
    Json(state.repository.get_settings())
}

/// Replace user settings
///
/// The pipeline re-reads settings every frame, so toggling
/// `emergency_monitoring_enabled` takes effect immediately.
pub async fn update_settings(
    State(state): State<Arc<RwLock<AppState>>>,
    Json(settings): Json<UserSettings>,
) -> Result<Json<UserSettings>, StatusCode> {
    info!(
        "Updating settings: monitoring={}, notifications={}",
        settings.emergency_monitoring_enabled, settings.notifications_enabled
    );

    let state = state.read().await;
    state
        .repository
        .update_settings(settings.clone())
        .map_err(|e| super::storage_status(&e))?;

    Ok(Json(settings))
}
