mod archive;
mod codec;
mod native;
mod orchestrator;

pub use archive::{
    Archive, ArchiveBuilder, ArchiveEntry, ZipArchiveBuilder, assemble_archive,
    collect_archive_entries, output_name,
};
pub use codec::{Codec, CompressOptions};
pub use native::NativeCodec;
pub use orchestrator::BatchOrchestrator;
