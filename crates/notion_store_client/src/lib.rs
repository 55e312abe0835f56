//! Minimal `RecordStore` trait and typed wire shapes for the remote record
//! store: a tabular database of WOD records nested under a page-like root
//! container, reached over HTTPS with bearer-token auth and cursor pagination.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub mod http_client;
pub mod pagination;
pub mod text;

/// Child item kind that marks the tabular container under the root page.
pub const CHILD_DATABASE_KIND: &str = "child_database";

/// Per-field character limit for a single rich-text segment.
pub const SEGMENT_MAX_CHARS: usize = 2000;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store api error: status {status}: {body}")]
    Api { status: u16, body: String },
}

/// One child item of a container, as returned by the children listing.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ChildBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub child_database: Option<ChildDatabase>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ChildDatabase {
    #[serde(default)]
    pub title: String,
}

impl ChildBlock {
    pub fn is_database(&self) -> bool {
        self.kind == CHILD_DATABASE_KIND
    }

    pub fn title(&self) -> &str {
        self.child_database
            .as_ref()
            .map(|d| d.title.as_str())
            .unwrap_or("")
    }
}

/// Identity of a stored record within one date: the location/program pair.
/// Missing properties extract as empty strings rather than failing the query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoredKey {
    pub location: String,
    pub program: String,
}

/// A record to persist. `body_segments` is the workout body split into
/// ordered segments of at most [`SEGMENT_MAX_CHARS`] characters whose
/// concatenation reconstructs the original text exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalRecord {
    pub title: String,
    /// Calendar date in `YYYY-MM-DD`.
    pub date: String,
    pub location: String,
    pub program: String,
    pub source_url: String,
    pub body_segments: Vec<String>,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// List every child of a container, following cursor pagination to the end.
    async fn list_children(&self, container_id: &str) -> Result<Vec<ChildBlock>, StoreError>;

    /// Return the dedup keys of all records whose date property equals
    /// `iso_date`, following pagination to the end.
    async fn query_records_by_date(
        &self,
        database_id: &str,
        iso_date: &str,
    ) -> Result<Vec<StoredKey>, StoreError>;

    /// Create one record in the given database.
    async fn create_record(
        &self,
        database_id: &str,
        record: &ExternalRecord,
    ) -> Result<(), StoreError>;
}
