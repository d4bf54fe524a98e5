use serde::Serialize;
use crate::core::types::{BatchSummary, EntryId, EntryReport};

/// Progress message type
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ProgressType {
    Start,
    Processing,
    Done,
    Error,
    Complete,
    Cancelled,
}

/// Unified progress struct published by the orchestrator
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Progress type
    pub progress_type: ProgressType,
    /// Number of entries that reached Done or Error in this run
    pub completed_tasks: usize,
    /// Number of entries in the run
    pub total_tasks: usize,
    /// Progress percentage (0-100)
    pub progress_percentage: usize,
    /// Current status message
    pub status: String,
    /// Entry this event is about, if any
    pub entry_id: Option<EntryId>,
    /// Entry state right after the transition
    pub entry: Option<EntryReport>,
    /// Error message for failed entries
    pub error: Option<String>,
    /// Run summary on Complete / Cancelled
    pub summary: Option<BatchSummary>,
}

impl Progress {
    /// Create a new Progress instance with basic information
    pub fn new(
        progress_type: ProgressType,
        completed_tasks: usize,
        total_tasks: usize,
        status: &str,
    ) -> Self {
        let progress_percentage = if total_tasks > 0 {
            (completed_tasks * 100) / total_tasks
        } else {
            0
        };

        Self {
            progress_type,
            completed_tasks,
            total_tasks,
            progress_percentage,
            status: status.to_string(),
            entry_id: None,
            entry: None,
            error: None,
            summary: None,
        }
    }

    pub fn with_entry(mut self, entry: EntryReport) -> Self {
        self.entry_id = Some(entry.id);
        self.error = entry.error.clone();
        self.entry = Some(entry);
        self
    }

    pub fn with_entry_id(mut self, id: EntryId) -> Self {
        self.entry_id = Some(id);
        self
    }

    pub fn with_summary(mut self, summary: BatchSummary) -> Self {
        self.summary = Some(summary);
        self
    }
}
