//! Sequential batch compression over the item store.
//!
//! Every run visits every entry present at the start of the run, in batch
//! order, one at a time: each entry is moved to Processing (dropping any old
//! result), handed to the codec, and settled as Done or Error before the next
//! entry is touched. Codec failures are recorded on the entry and never abort
//! the run.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::core::{BatchSummary, Entry, EntryId, ItemStore, Progress, ProgressType, StatusKind};
use crate::processing::codec::{Codec, CompressOptions};
use crate::utils::{CompressorError, CompressorResult, validate_quality};

/// Buffered progress events per subscriber before it starts lagging
const PROGRESS_CAPACITY: usize = 256;

/// Releases the busy flag when a run ends, however it ends.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct BatchOrchestrator<C: Codec> {
    codec: Arc<C>,
    store: Arc<ItemStore>,
    max_dimension: u32,
    running: AtomicBool,
    cancel_requested: AtomicBool,
    progress: broadcast::Sender<Progress>,
}

impl<C: Codec> BatchOrchestrator<C> {
    pub fn new(codec: Arc<C>, store: Arc<ItemStore>, max_dimension: u32) -> Self {
        let (progress, _) = broadcast::channel(PROGRESS_CAPACITY);
        Self {
            codec,
            store,
            max_dimension,
            running: AtomicBool::new(false),
            cancel_requested: AtomicBool::new(false),
            progress,
        }
    }

    pub fn store(&self) -> &Arc<ItemStore> {
        &self.store
    }

    pub fn codec(&self) -> &Arc<C> {
        &self.codec
    }

    /// Receives every progress event published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Progress> {
        self.progress.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Asks the current run to stop before its next entry.
    ///
    /// The entry in flight still settles normally. Has no effect when idle.
    pub fn cancel(&self) {
        if self.is_running() {
            debug!("Cancellation requested");
            self.cancel_requested.store(true, Ordering::Release);
        }
    }

    /// Processes (or re-processes) every entry in the batch at `quality`.
    ///
    /// Fails only when `quality` is invalid or another run is in flight;
    /// per-entry failures are reported through entry status and the summary.
    pub async fn run_batch(&self, quality: f32) -> CompressorResult<BatchSummary> {
        let quality = validate_quality(quality)?;

        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Rejected batch run: another run is in progress");
            return Err(CompressorError::Busy);
        }
        let _guard = RunGuard(&self.running);
        self.cancel_requested.store(false, Ordering::Release);

        let options = CompressOptions {
            quality,
            max_dimension: self.max_dimension,
        };
        Ok(self.process_all(options).await)
    }

    async fn process_all(&self, options: CompressOptions) -> BatchSummary {
        let started = Instant::now();
        let ids = self.store.ids();
        let total = ids.len();
        let mut summary = BatchSummary {
            total,
            ..BatchSummary::default()
        };

        info!("Compressing {} entries at quality {:.2}", total, options.quality);
        self.emit(Progress::new(ProgressType::Start, 0, total, "Compressing"));

        for (idx, id) in ids.into_iter().enumerate() {
            if self.cancel_requested.swap(false, Ordering::AcqRel) {
                info!("Batch cancelled after {}/{} entries", idx, total);
                summary.cancelled = true;
                break;
            }
            self.process_entry(id, idx, options, &mut summary).await;
        }

        summary.elapsed_ms = started.elapsed().as_millis() as u64;
        let (progress_type, status) = if summary.cancelled {
            (ProgressType::Cancelled, "Cancelled")
        } else {
            (ProgressType::Complete, "Complete")
        };

        info!(
            "Batch finished: {} done, {} failed, {} skipped in {}ms",
            summary.done, summary.failed, summary.skipped, summary.elapsed_ms
        );
        self.emit(
            Progress::new(progress_type, summary.processed(), total, status)
                .with_summary(summary.clone()),
        );
        summary
    }

    async fn process_entry(
        &self,
        id: EntryId,
        idx: usize,
        options: CompressOptions,
        summary: &mut BatchSummary,
    ) {
        let total = summary.total;

        let Some(job) = self.store.begin_processing(id) else {
            debug!("Entry {id} was removed before processing");
            summary.skipped += 1;
            return;
        };

        debug!("Processing {} ({}/{})", job.display_name, idx + 1, total);
        self.emit(
            Progress::new(ProgressType::Processing, summary.processed(), total, &job.display_name)
                .with_entry_id(id),
        );

        let outcome = self
            .codec
            .compress(job.source, job.format, options)
            .await
            .map_err(|e| match e {
                CompressorError::CompressionFailed(_) => e,
                other => CompressorError::compression(other.to_string()),
            });

        if let Err(e) = &outcome {
            warn!("Compression failed for {}: {}", job.display_name, e);
        }

        let Some(entry) = self.store.complete(id, outcome) else {
            debug!("Discarding result for {}: entry no longer in batch", job.display_name);
            summary.skipped += 1;
            return;
        };

        self.record(&entry, summary);
        let progress_type = match entry.status().kind() {
            StatusKind::Done => ProgressType::Done,
            _ => ProgressType::Error,
        };
        self.emit(
            Progress::new(progress_type, summary.processed(), total, entry.display_name())
                .with_entry(entry.report()),
        );
    }

    fn record(&self, entry: &Entry, summary: &mut BatchSummary) {
        match entry.result_size() {
            Some(result_size) => {
                summary.done += 1;
                summary.original_bytes += entry.original_size();
                summary.result_bytes += result_size;

                if let Some(stats) = entry.stats() {
                    debug!(
                        "{} compressed ({:.2} KB saved / {}%)",
                        entry.display_name(),
                        stats.saved_bytes as f64 / 1024.0,
                        stats.saved_percent
                    );
                }
            }
            None => summary.failed += 1,
        }
    }

    fn emit(&self, progress: Progress) {
        // No subscribers is fine
        let _ = self.progress.send(progress);
    }
}
