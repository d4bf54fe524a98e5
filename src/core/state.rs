//! Shared application state.

use std::sync::Arc;
use tracing::debug;

use crate::config::CompressorConfig;
use crate::core::ItemStore;
use crate::gate::ClearAllGate;
use crate::processing::{ArchiveBuilder, BatchOrchestrator, Codec, NativeCodec, ZipArchiveBuilder};

/// Application state shared by every command.
///
/// Cloning is cheap; all clones see the same batch.
pub struct AppState<C: Codec = NativeCodec, A: ArchiveBuilder = ZipArchiveBuilder> {
    config: Arc<CompressorConfig>,
    store: Arc<ItemStore>,
    orchestrator: Arc<BatchOrchestrator<C>>,
    archive: Arc<A>,
    gate: Arc<ClearAllGate>,
}

impl<C: Codec, A: ArchiveBuilder> Clone for AppState<C, A> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            store: self.store.clone(),
            orchestrator: self.orchestrator.clone(),
            archive: self.archive.clone(),
            gate: self.gate.clone(),
        }
    }
}

impl AppState {
    /// State backed by the native codec and zip output.
    pub fn new(config: CompressorConfig) -> Self {
        Self::with_components(config, NativeCodec::new(), ZipArchiveBuilder)
    }
}

impl<C: Codec, A: ArchiveBuilder> AppState<C, A> {
    /// State with a caller-supplied codec and archive builder.
    pub fn with_components(config: CompressorConfig, codec: C, archive: A) -> Self {
        let store = Arc::new(ItemStore::new());
        let orchestrator = Arc::new(BatchOrchestrator::new(
            Arc::new(codec),
            store.clone(),
            config.max_dimension,
        ));
        let gate = Arc::new(ClearAllGate::new(config.confirm_window()));
        debug!(
            "AppState initialized (max dimension {}, confirm window {:?})",
            config.max_dimension,
            config.confirm_window()
        );

        Self {
            config: Arc::new(config),
            store,
            orchestrator,
            archive: Arc::new(archive),
            gate,
        }
    }

    pub fn config(&self) -> &CompressorConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<ItemStore> {
        &self.store
    }

    pub fn orchestrator(&self) -> &Arc<BatchOrchestrator<C>> {
        &self.orchestrator
    }

    pub fn archive_builder(&self) -> &Arc<A> {
        &self.archive
    }

    pub fn gate(&self) -> &ClearAllGate {
        &self.gate
    }

    pub fn codec(&self) -> &Arc<C> {
        self.orchestrator.codec()
    }
}
