//! Idempotent create-if-absent synchronization into the record store.
//!
//! Idempotency is best-effort, client-side: existing records for the target
//! date are queried first and only missing dedup keys are created. The store
//! offers no server-side idempotency key, so this holds only under a
//! single-writer assumption — two overlapping runs for the same date can both
//! observe an empty existing-set and create duplicates. The external
//! scheduler guarantees non-overlapping invocations.

use std::collections::HashSet;

use notion_store_client::{ExternalRecord, RecordStore, SEGMENT_MAX_CHARS, StoredKey, text};

use crate::dates::ScheduleDate;
use crate::error::SyncError;
use crate::schedule::{self, WodEntry};

/// Titles are cut to this many characters before the store would reject them.
pub const TITLE_MAX_CHARS: usize = 100;

/// Counts reported by one sync run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub skipped: usize,
}

pub struct SyncEngine<S> {
    store: S,
    root_page_id: String,
    source_url: String,
}

impl<S: RecordStore> SyncEngine<S> {
    pub fn new(store: S, root_page_id: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            store,
            root_page_id: root_page_id.into(),
            source_url: source_url.into(),
        }
    }

    /// Create every entry of `target`'s date that the store does not already
    /// hold, in parse order, one create at a time.
    ///
    /// A day with no matching entries is an anomaly that needs operator
    /// attention, so it fails rather than reporting zero counts. A failed
    /// remote call aborts the rest of the run; creates already issued stay
    /// (the next run's dedup check converges on them).
    pub async fn sync(
        &self,
        target: &ScheduleDate,
        entries: &[WodEntry],
    ) -> Result<SyncReport, SyncError> {
        let matching = schedule::entries_for_date(entries, &target.source_format());
        if matching.is_empty() {
            return Err(if entries.is_empty() {
                SyncError::NoEntries
            } else {
                SyncError::NoEntriesForDate(target.source_format())
            });
        }

        let database_id = self.discover_database().await?;
        let existing = self
            .store
            .query_records_by_date(&database_id, &target.iso())
            .await?;
        let mut seen: HashSet<StoredKey> = existing.into_iter().collect();

        let mut report = SyncReport::default();
        for entry in &matching {
            let key = StoredKey {
                location: entry.location.clone(),
                program: entry.program.clone(),
            };
            if seen.contains(&key) {
                tracing::debug!(
                    location = %entry.location,
                    program = %entry.program,
                    "record already present, skipping"
                );
                report.skipped += 1;
                continue;
            }
            let record = self.build_record(target, entry);
            self.store.create_record(&database_id, &record).await?;
            // same-key entries later in this run are duplicates too
            seen.insert(key);
            report.created += 1;
        }

        tracing::info!(
            date = %target.iso(),
            created = report.created,
            skipped = report.skipped,
            "sync complete"
        );
        Ok(report)
    }

    /// Resolve the tabular container nested under the root page: the first
    /// child whose kind marks it as a database. Resolved once per run.
    async fn discover_database(&self) -> Result<String, SyncError> {
        let children = self.store.list_children(&self.root_page_id).await?;
        children
            .into_iter()
            .find(|c| c.is_database())
            .map(|c| c.id)
            .ok_or_else(|| SyncError::MissingDatabase(self.root_page_id.clone()))
    }

    fn build_record(&self, target: &ScheduleDate, entry: &WodEntry) -> ExternalRecord {
        let title = format!("{} - {} - {}", entry.date, entry.location, entry.program);
        ExternalRecord {
            title: truncate_chars(&title, TITLE_MAX_CHARS),
            date: target.iso(),
            location: entry.location.clone(),
            program: entry.program.clone(),
            source_url: self.source_url.clone(),
            body_segments: text::segment_text(&entry.body, SEGMENT_MAX_CHARS),
        }
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("abcdef", 4), "abcd");
        assert_eq!(truncate_chars("ação", 3), "açã");
        assert_eq!(truncate_chars("short", 100), "short");
    }
}
