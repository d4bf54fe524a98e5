//! The item store: ordered batch of entries and their mutable status.
//!
//! All mutation goes through the store's own methods. Readers receive cloned
//! snapshots, never references into the live batch.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use parking_lot::RwLock;
use tracing::debug;

use crate::core::types::{Entry, EntryId, EntryStatus, SourceFile};
use crate::utils::{CompressorResult, ImageFormat};

/// Everything the codec needs for one entry, detached from the store.
#[derive(Debug, Clone)]
pub struct ProcessingJob {
    pub id: EntryId,
    pub display_name: String,
    pub source: Arc<[u8]>,
    pub format: Option<ImageFormat>,
}

#[derive(Debug)]
pub struct ItemStore {
    entries: RwLock<Vec<Entry>>,
    next_id: AtomicU64,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Appends one Idle entry per file, in input order.
    ///
    /// Never fails: content problems only surface once the entry is processed.
    pub fn add(&self, files: impl IntoIterator<Item = SourceFile>) -> Vec<EntryId> {
        let new_entries: Vec<Entry> = files
            .into_iter()
            .map(|file| {
                let id = EntryId(self.next_id.fetch_add(1, Ordering::Relaxed));
                Entry::new(id, file)
            })
            .collect();

        let ids: Vec<EntryId> = new_entries.iter().map(Entry::id).collect();
        let mut entries = self.entries.write();
        entries.extend(new_entries);
        debug!("Added {} entries (batch size {})", ids.len(), entries.len());
        ids
    }

    /// Deletes the entry with `id`. Returns whether anything was removed.
    pub fn remove(&self, id: EntryId) -> bool {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|e| e.id() != id);
        let removed = entries.len() != before;
        if removed {
            debug!("Removed entry {id}");
        }
        removed
    }

    /// Deletes every entry. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.write();
        let removed = entries.len();
        entries.clear();
        debug!("Cleared {removed} entries");
        removed
    }

    /// Current batch in insertion order.
    pub fn snapshot(&self) -> Vec<Entry> {
        self.entries.read().clone()
    }

    pub fn get(&self, id: EntryId) -> Option<Entry> {
        self.entries.read().iter().find(|e| e.id() == id).cloned()
    }

    pub fn ids(&self) -> Vec<EntryId> {
        self.entries.read().iter().map(Entry::id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn has_done(&self) -> bool {
        self.entries.read().iter().any(Entry::is_done)
    }

    /// Done entries in batch order.
    pub fn done_entries(&self) -> Vec<Entry> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.is_done())
            .cloned()
            .collect()
    }

    /// Moves an entry into Processing, dropping any previous result.
    ///
    /// Returns `None` when the entry no longer exists.
    pub fn begin_processing(&self, id: EntryId) -> Option<ProcessingJob> {
        let mut entries = self.entries.write();
        let entry = entries.iter_mut().find(|e| e.id() == id)?;
        entry.status = EntryStatus::Processing;

        Some(ProcessingJob {
            id,
            display_name: entry.display_name().to_string(),
            source: entry.source().clone(),
            format: entry.format(),
        })
    }

    /// Records the codec outcome for an entry that is still Processing.
    ///
    /// Returns the updated entry, or `None` when the entry was removed (or
    /// cleared) in the meantime, in which case the outcome is discarded.
    pub fn complete(&self, id: EntryId, outcome: CompressorResult<Vec<u8>>) -> Option<Entry> {
        let mut entries = self.entries.write();
        let entry = entries
            .iter_mut()
            .find(|e| e.id() == id && e.status == EntryStatus::Processing)?;

        entry.status = match outcome {
            Ok(bytes) => EntryStatus::Done(bytes.into()),
            Err(e) => EntryStatus::Error(e.to_string()),
        };
        Some(entry.clone())
    }
}
