// Module declarations in dependency order
pub mod utils;
pub mod config;
pub mod core;
pub mod gate;
pub mod processing;
pub mod commands;

// Public exports for external consumers
pub use crate::core::{AppState, BatchSummary, Entry, EntryId, EntryReport, ItemStore, Progress, SourceFile};
pub use crate::config::CompressorConfig;
pub use crate::gate::{ClearAllGate, GateOutcome};
pub use crate::processing::{Archive, ArchiveBuilder, BatchOrchestrator, Codec, CompressOptions, NativeCodec, ZipArchiveBuilder};
pub use crate::utils::{CompressorError, CompressorResult, ImageFormat};
pub use crate::commands::*;

// This library file is the public API; the CLI entry point lives in main.rs.
