//! API Route Handlers

use axum::http::StatusCode;
use storage::StorageError;

pub mod alerts;
pub mod contacts;
pub mod journal;
pub mod readings;
pub mod settings;
pub mod stats;

/// Map storage errors onto HTTP status codes
fn storage_status(err: &StorageError) -> StatusCode {
    match err {
        StorageError::NotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
