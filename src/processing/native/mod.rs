//! Native image recompression via the `image` crate.
//!
//! # Architecture
//!
//! - [`NativeCodec`]: Implements [`Codec`](crate::processing::Codec) on the blocking pool.
//! - [`resize`]: Longest-side downscaling to the configured maximum dimension.
//! - [`formats`]: Declared-format decoding and per-format encoders.

mod executor;
mod formats;
mod resize;

pub use executor::NativeCodec;
