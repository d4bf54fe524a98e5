//! Core application types and state management.
//!
//! This module contains the fundamental types used throughout the application:
//! - [`AppState`]: Shared state handed to every command
//! - [`ItemStore`]: The ordered batch of entries
//! - [`Entry`]: One submitted image and its processing lifecycle
//! - [`Progress`]: Events published while a batch runs

mod state;
mod store;
mod types;
mod progress;

pub use state::AppState;
pub use store::{ItemStore, ProcessingJob};
pub use types::{
    BatchSummary, CompressionStats, Entry, EntryId, EntryReport, EntryStatus, SourceFile,
    StatusKind,
};
pub use progress::{Progress, ProgressType};
