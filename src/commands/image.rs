//! Command handlers for the batch compressor.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::{AppState, BatchSummary, EntryId, EntryReport, SourceFile};
use crate::gate::GateOutcome;
use crate::processing::{Archive, ArchiveBuilder, Codec, assemble_archive, collect_archive_entries};
use crate::utils::{CompressorResult, validate_source_file};

/// Outcome of submitting files.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFilesResult {
    /// Ids of the new entries, in submission order
    pub added: Vec<EntryId>,
    /// Reasons for files that did not declare an accepted image type
    pub rejected: Vec<String>,
}

/// Outcome of a clear-all press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ClearAllResult {
    /// First press; press again within `expires_in_ms` to clear.
    #[serde(rename_all = "camelCase")]
    PendingConfirmation { expires_in_ms: u64 },
    /// Second press; the batch was emptied.
    Cleared { removed: usize },
}

/// Adds files that declare JPEG, PNG or WebP; others are reported back.
pub fn add_files<C: Codec, A: ArchiveBuilder>(
    state: &AppState<C, A>,
    files: Vec<SourceFile>,
) -> AddFilesResult {
    let mut accepted = Vec::with_capacity(files.len());
    let mut rejected = Vec::new();

    for file in files {
        match validate_source_file(&file) {
            Ok(_) => accepted.push(file),
            Err(e) => {
                warn!("Rejected file: {e}");
                rejected.push(e.to_string());
            }
        }
    }

    let added = state.store().add(accepted);
    debug!("Accepted {} files, rejected {}", added.len(), rejected.len());
    AddFilesResult { added, rejected }
}

/// Compresses every entry, re-processing ones that already ran.
///
/// Uses the configured default quality when `quality` is `None`.
pub async fn compress_all<C: Codec, A: ArchiveBuilder>(
    state: &AppState<C, A>,
    quality: Option<f32>,
) -> CompressorResult<BatchSummary> {
    let quality = quality.unwrap_or(state.config().default_quality);
    debug!("Received compress_all command for {} entries", state.store().len());
    state.orchestrator().run_batch(quality).await
}

/// Requests the running batch to stop after the current entry.
pub fn cancel_compression<C: Codec, A: ArchiveBuilder>(state: &AppState<C, A>) {
    state.orchestrator().cancel();
}

/// Packages every Done entry. Returns `None` when there is nothing to package.
pub async fn download_all<C: Codec, A: ArchiveBuilder>(
    state: &AppState<C, A>,
) -> CompressorResult<Option<Archive>> {
    let config = state.config();
    let entries = collect_archive_entries(&state.store().snapshot(), &config.output_prefix);
    assemble_archive(state.archive_builder().clone(), entries, &config.archive_name).await
}

/// Removes one entry immediately. Unknown ids are ignored.
pub fn remove_file<C: Codec, A: ArchiveBuilder>(state: &AppState<C, A>, id: EntryId) -> bool {
    state.store().remove(id)
}

/// Clears the batch on the second press within the confirmation window.
pub fn clear_all<C: Codec, A: ArchiveBuilder>(state: &AppState<C, A>) -> ClearAllResult {
    match state.gate().press() {
        GateOutcome::Armed { .. } => {
            let remaining = state.gate().remaining().unwrap_or_else(|| state.gate().window());
            info!("Clear all requested; press again within {:?} to confirm", remaining);
            ClearAllResult::PendingConfirmation {
                expires_in_ms: remaining.as_millis() as u64,
            }
        }
        GateOutcome::Confirmed => {
            let removed = state.store().clear();
            info!("Cleared {removed} entries");
            ClearAllResult::Cleared { removed }
        }
    }
}

/// Current batch for display.
pub fn list_files<C: Codec, A: ArchiveBuilder>(state: &AppState<C, A>) -> Vec<EntryReport> {
    state.store().snapshot().iter().map(|e| e.report()).collect()
}

/// Whether a download would produce an archive.
pub fn has_compressed_files<C: Codec, A: ArchiveBuilder>(state: &AppState<C, A>) -> bool {
    state.store().has_done()
}

pub fn is_compressing<C: Codec, A: ArchiveBuilder>(state: &AppState<C, A>) -> bool {
    state.orchestrator().is_running()
}
