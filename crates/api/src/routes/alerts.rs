//! Alert Routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::AppState;
use storage::AlertRecord;

/// Query parameters for the alerts endpoint
#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    /// Filter by direction ("LOW" or "HIGH")
    pub direction: Option<String>,
    /// Maximum number of records
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// Response for the alerts endpoint
#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub data: Vec<AlertRecord>,
    pub count: usize,
}

/// Get fired alerts, newest first
pub async fn get_alerts(
    State(state): State<Arc<RwLock<AppState>>>,
    Query(params): Query<AlertQuery>,
) -> Result<Json<AlertResponse>, StatusCode> {
    let state = state.read().await;

    let mut data = state
        .repository
        .get_alerts(params.limit)
        .map_err(|e| super::storage_status(&e))?;

    if let Some(direction) = &params.direction {
        data.retain(|a| a.direction.eq_ignore_ascii_case(direction));
    }

    Ok(Json(AlertResponse {
        count: data.len(),
        data,
    }))
}
