//! Export summary and reporting
//!
//! This module defines the per-run report returned by the exporter.

use std::time::Duration;

/// Chunks written for one item type and language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedGroup {
    /// Item type identifier
    pub item_type: String,

    /// Language
    pub language: String,

    /// Items across all pages
    pub items: usize,

    /// Download URLs, one per page
    pub urls: Vec<String>,
}

/// Summary of an export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Identifier recorded in the lock marker and logs
    pub run_id: String,

    /// Chunk directory relative to the export root
    pub chunk_dir: String,

    /// Number of chunk files written
    pub chunks_written: usize,

    /// Number of items written across all chunks
    pub items_exported: usize,

    /// Number of events in the notification
    pub events_emitted: usize,

    /// Whether the notification was delivered
    pub notification_sent: bool,

    /// Per item type and language breakdown
    pub groups: Vec<ExportedGroup>,

    /// Duration of the run
    pub duration: Duration,
}

impl ExportSummary {
    /// Create an empty summary for a run
    pub fn new(run_id: impl Into<String>, chunk_dir: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            chunk_dir: chunk_dir.into(),
            chunks_written: 0,
            items_exported: 0,
            events_emitted: 0,
            notification_sent: false,
            groups: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record the chunks of one item type and language
    pub fn add_group(&mut self, group: ExportedGroup) {
        self.chunks_written += group.urls.len();
        self.items_exported += group.items;
        self.groups.push(group);
    }

    /// Whether anything was exported
    pub fn is_empty(&self) -> bool {
        self.chunks_written == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            chunk_dir = %self.chunk_dir,
            chunks = self.chunks_written,
            items = self.items_exported,
            events = self.events_emitted,
            notification_sent = self.notification_sent,
            duration_ms = self.duration.as_millis() as u64,
            "Export completed"
        );

        for group in &self.groups {
            tracing::debug!(
                item_type = %group.item_type,
                language = %group.language,
                items = group.items,
                chunks = group.urls.len(),
                "Exported group"
            );
        }
    }
}
