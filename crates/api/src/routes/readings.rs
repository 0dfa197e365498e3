//! Vitals Reading Routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::AppState;
use storage::ReadingRecord;

/// Query parameters for the readings endpoint
#[derive(Debug, Deserialize)]
pub struct ReadingQuery {
    /// Only return readings at or after this timestamp (ms)
    pub since_ms: Option<i64>,
    /// Maximum number of records
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

/// Response for the readings endpoint
#[derive(Debug, Serialize)]
pub struct ReadingResponse {
    pub data: Vec<ReadingRecord>,
    pub count: usize,
}

/// Get recent readings, newest first
pub async fn get_readings(
    State(state): State<Arc<RwLock<AppState>>>,
    Query(params): Query<ReadingQuery>,
) -> Result<Json<ReadingResponse>, StatusCode> {
    let state = state.read().await;

    let mut data = match params.since_ms {
        Some(since) => state
            .repository
            .get_readings_since(since)
            .map_err(|e| super::storage_status(&e))?,
        None => state
            .repository
            .get_readings(params.limit)
            .map_err(|e| super::storage_status(&e))?,
    };
    data.truncate(params.limit);

    Ok(Json(ReadingResponse {
        count: data.len(),
        data,
    }))
}
