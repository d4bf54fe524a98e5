//! Native codec backed by the `image` crate.
//!
//! Each image is processed inside a `tokio::task::spawn_blocking` call so the
//! async runtime is never blocked while decoding, resizing and encoding.

use std::sync::Arc;
use tracing::debug;

use crate::processing::codec::{Codec, CompressOptions};
use crate::utils::{CompressorError, CompressorResult, ImageFormat};

use super::formats::{decode, encode_as};
use super::resize::fit_within;

/// Codec that recompresses in-process with no external tooling.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCodec;

impl NativeCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for NativeCodec {
    async fn compress(
        &self,
        source: Arc<[u8]>,
        format: Option<ImageFormat>,
        options: CompressOptions,
    ) -> CompressorResult<Vec<u8>> {
        tokio::task::spawn_blocking(move || compress_single(&source, format, options))
            .await
            .map_err(|e| CompressorError::compression(format!("Task panicked: {e}")))?
    }
}

// ── Blocking image processing (runs on tokio's blocking thread pool) ──────────────────

fn compress_single(
    source: &[u8],
    format: Option<ImageFormat>,
    options: CompressOptions,
) -> CompressorResult<Vec<u8>> {
    let (image, format) = decode(source, format)?;
    debug!(
        "Decoded {:?}: {}×{} ({} bytes)",
        format,
        image.width(),
        image.height(),
        source.len()
    );

    let image = fit_within(image, options.max_dimension);
    let output = encode_as(&image, format, options.quality)?;

    debug!(
        "Encoded {:?} at quality {:.2}: {}×{} → {} bytes",
        format,
        options.quality,
        image.width(),
        image.height(),
        output.len()
    );
    Ok(output)
}
