//! Core types for batch entries, their lifecycle and their results.

use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use crate::utils::ImageFormat;

/// Identifier of an entry, unique for the lifetime of the store that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub(crate) u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A raw file as submitted by the caller.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File name as provided by the caller
    pub name: String,
    /// Declared MIME type, if any
    pub content_type: Option<String>,
    /// File content
    pub bytes: Arc<[u8]>,
}

impl SourceFile {
    pub fn new(
        name: impl Into<String>,
        content_type: Option<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Format resolved from the declared content type.
    pub fn declared_format(&self) -> Option<ImageFormat> {
        self.content_type
            .as_deref()
            .and_then(ImageFormat::from_content_type)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Processing state of an entry.
///
/// The compressed output lives inside `Done`, so an entry carries a result
/// exactly when it is done.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryStatus {
    Idle,
    Processing,
    Done(Arc<[u8]>),
    Error(String),
}

impl EntryStatus {
    pub fn kind(&self) -> StatusKind {
        match self {
            Self::Idle => StatusKind::Idle,
            Self::Processing => StatusKind::Processing,
            Self::Done(_) => StatusKind::Done,
            Self::Error(_) => StatusKind::Error,
        }
    }
}

/// Payload-free status tag used in reports and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Idle,
    Processing,
    Done,
    Error,
}

/// One submitted image and its processing lifecycle.
#[derive(Debug, Clone)]
pub struct Entry {
    id: EntryId,
    display_name: String,
    original_size: u64,
    format: Option<ImageFormat>,
    source: Arc<[u8]>,
    pub(crate) status: EntryStatus,
}

impl Entry {
    pub(crate) fn new(id: EntryId, file: SourceFile) -> Self {
        Self {
            id,
            format: file.declared_format(),
            original_size: file.bytes.len() as u64,
            display_name: file.name,
            source: file.bytes,
            status: EntryStatus::Idle,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn original_size(&self) -> u64 {
        self.original_size
    }

    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    pub fn source(&self) -> &Arc<[u8]> {
        &self.source
    }

    pub fn status(&self) -> &EntryStatus {
        &self.status
    }

    pub fn is_done(&self) -> bool {
        matches!(self.status, EntryStatus::Done(_))
    }

    pub fn result_bytes(&self) -> Option<&Arc<[u8]>> {
        match &self.status {
            EntryStatus::Done(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn result_size(&self) -> Option<u64> {
        self.result_bytes().map(|b| b.len() as u64)
    }

    pub fn stats(&self) -> Option<CompressionStats> {
        self.result_size()
            .map(|size| CompressionStats::new(self.original_size, size))
    }

    /// Serializable view without the binary payloads.
    pub fn report(&self) -> EntryReport {
        EntryReport {
            id: self.id,
            name: self.display_name.clone(),
            original_size: self.original_size,
            status: self.status.kind(),
            result_size: self.result_size(),
            error: match &self.status {
                EntryStatus::Error(message) => Some(message.clone()),
                _ => None,
            },
            stats: self.stats(),
        }
    }
}

/// Size savings of a compressed entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionStats {
    /// Bytes saved (negative if the output grew)
    pub saved_bytes: i64,
    /// Rounded percentage saved relative to the original
    pub saved_percent: i64,
}

impl CompressionStats {
    pub fn new(original_size: u64, result_size: u64) -> Self {
        let saved_bytes = original_size as i64 - result_size as i64;
        let saved_percent = if original_size > 0 {
            ((1.0 - result_size as f64 / original_size as f64) * 100.0).round() as i64
        } else {
            0
        };
        Self { saved_bytes, saved_percent }
    }
}

/// Frontend-facing description of an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryReport {
    pub id: EntryId,
    pub name: String,
    pub original_size: u64,
    pub status: StatusKind,
    pub result_size: Option<u64>,
    pub error: Option<String>,
    pub stats: Option<CompressionStats>,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Entries in the batch when the run started
    pub total: usize,
    /// Entries that reached Done
    pub done: usize,
    /// Entries that reached Error
    pub failed: usize,
    /// Entries removed before or while being processed
    pub skipped: usize,
    /// Original bytes of the entries that reached Done
    pub original_bytes: u64,
    /// Compressed bytes of the entries that reached Done
    pub result_bytes: u64,
    /// Whether the run stopped early on request
    pub cancelled: bool,
    /// Wall-clock duration of the run
    pub elapsed_ms: u64,
}

impl BatchSummary {
    pub fn processed(&self) -> usize {
        self.done + self.failed
    }

    pub fn saved_bytes(&self) -> i64 {
        self.original_bytes as i64 - self.result_bytes as i64
    }
}
