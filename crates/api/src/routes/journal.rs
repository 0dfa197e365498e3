//! Journal Routes

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::AppState;
use storage::JournalEntry;

/// Query parameters for the journal endpoint
#[derive(Debug, Deserialize)]
pub struct JournalQuery {
    /// Start of the inclusive date range
    pub from: NaiveDate,
    /// End of the inclusive date range
    pub to: NaiveDate,
}

/// Response for the journal endpoint
#[derive(Debug, Serialize)]
pub struct JournalResponse {
    pub data: Vec<JournalEntry>,
    pub count: usize,
}

/// Get journal entries in a date range, oldest first
pub async fn get_entries(
    State(state): State<Arc<RwLock<AppState>>>,
    Query(params): Query<JournalQuery>,
) -> Result<Json<JournalResponse>, StatusCode> {
    if params.from > params.to {
        return Err(StatusCode::BAD_REQUEST);
    }

    let state = state.read().await;
    let data = state
        .repository
        .get_journal_range(params.from, params.to)
        .map_err(|e| super::storage_status(&e))?;

    Ok(Json(JournalResponse {
        count: data.len(),
        data,
    }))
}

/// Insert or replace the entry for its date
pub async fn upsert_entry(
    State(state): State<Arc<RwLock<AppState>>>,
    Json(entry): Json<JournalEntry>,
) -> Result<Json<JournalEntry>, StatusCode> {
    let state = state.read().await;
    state
        .repository
        .upsert_journal(entry.clone())
        .map_err(|e| super::storage_status(&e))?;

    Ok(Json(entry))
}
