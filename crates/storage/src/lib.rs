//! Storage Layer
//!
//! In-memory repository standing in for the hosted backend. Persistence and
//! sync are deliberately absent; retention limits keep memory bounded.

mod repository;

pub use repository::{
    AlertRecord, JournalEntry, PregnancyInfo, ReadingRecord, Repository, UserSettings,
};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Store error: {0}")]
    StoreError(String),
    #[error("Record not found")]
    NotFound,
}
