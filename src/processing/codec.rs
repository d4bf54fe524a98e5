//! The codec seam: anything that can turn source bytes into recompressed bytes.

use std::future::Future;
use std::sync::Arc;
use crate::utils::{CompressorResult, ImageFormat};

/// Settings applied to every entry of one batch run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressOptions {
    /// Quality in (0, 1]; higher means larger, more faithful output
    pub quality: f32,
    /// Longest allowed output side in pixels
    pub max_dimension: u32,
}

/// Recompresses one image.
///
/// Implementations may offload work to other threads but must resolve only
/// once the output (or failure) for this call is final. Any failure is
/// reported as [`CompressorError::CompressionFailed`](crate::utils::CompressorError).
pub trait Codec: Send + Sync + 'static {
    fn compress(
        &self,
        source: Arc<[u8]>,
        format: Option<ImageFormat>,
        options: CompressOptions,
    ) -> impl Future<Output = CompressorResult<Vec<u8>>> + Send;
}
