//! Error types for the sync pipeline.
//!
//! Nothing here is retried or suppressed: every variant aborts the run and is
//! reported in full to the operator. Re-running the whole job later is the
//! retry strategy; the dedup check in the sync engine makes that safe.

use notion_store_client::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("schedule text contained no entries for any date")]
    NoEntries,

    #[error("no schedule entries found for {0}")]
    NoEntriesForDate(String),

    #[error("no child database found under root page {0}")]
    MissingDatabase(String),
}

/// Result type alias for pipeline operations.
pub type SyncResult<T> = Result<T, SyncError>;
