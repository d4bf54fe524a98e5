//! Command handlers for callers of the compressor.
//!
//! - [`add_files`]: Submit images to the batch
//! - [`compress_all`]: (Re)compress every entry
//! - [`download_all`]: Package compressed entries into one archive
//! - [`remove_file`] / [`clear_all`]: Remove entries

mod image;

pub use self::image::*;
