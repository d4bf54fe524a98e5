//! Packaging Done entries into one downloadable archive.

use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::sync::Arc;
use serde::Serialize;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::Entry;
use crate::utils::{CompressorError, CompressorResult};

/// One file inside the archive.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Arc<[u8]>,
}

/// A finished archive ready to be saved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Archive {
    /// Suggested file name
    pub file_name: String,
    /// Number of files written, after same-name entries collapsed
    pub entry_count: usize,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Builds an archive blob from named files.
pub trait ArchiveBuilder: Send + Sync + 'static {
    fn build(&self, entries: &[ArchiveEntry]) -> CompressorResult<Vec<u8>>;
}

/// Zip output with entries stored as-is: the payloads are already compressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveBuilder;

impl ArchiveBuilder for ZipArchiveBuilder {
    fn build(&self, entries: &[ArchiveEntry]) -> CompressorResult<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        for entry in latest_by_name(entries) {
            zip.start_file(entry.name.as_str(), options)?;
            zip.write_all(&entry.bytes)?;
        }

        Ok(zip.finish()?.into_inner())
    }
}

/// Collapses entries sharing a name: the last payload wins, kept at the
/// position where the name first appeared.
pub fn latest_by_name(entries: &[ArchiveEntry]) -> Vec<ArchiveEntry> {
    let mut slots: HashMap<&str, usize> = HashMap::with_capacity(entries.len());
    let mut files: Vec<ArchiveEntry> = Vec::with_capacity(entries.len());

    for entry in entries {
        match slots.get(entry.name.as_str()) {
            Some(&slot) => {
                debug!("Overwriting {} with a later entry", entry.name);
                files[slot].bytes = entry.bytes.clone();
            }
            None => {
                slots.insert(entry.name.as_str(), files.len());
                files.push(entry.clone());
            }
        }
    }
    files
}

/// Name of an entry's output inside the archive.
pub fn output_name(prefix: &str, display_name: &str) -> String {
    format!("{prefix}{display_name}")
}

/// Done entries as archive files, in batch order. Other entries are ignored.
pub fn collect_archive_entries(entries: &[Entry], prefix: &str) -> Vec<ArchiveEntry> {
    entries
        .iter()
        .filter_map(|entry| {
            entry.result_bytes().map(|bytes| ArchiveEntry {
                name: output_name(prefix, entry.display_name()),
                bytes: bytes.clone(),
            })
        })
        .collect()
}

/// Builds the archive on the blocking pool.
///
/// Returns `Ok(None)` without invoking the builder when there is nothing to
/// package.
pub async fn assemble_archive<A: ArchiveBuilder>(
    builder: Arc<A>,
    entries: Vec<ArchiveEntry>,
    file_name: &str,
) -> CompressorResult<Option<Archive>> {
    if entries.is_empty() {
        debug!("No compressed entries, skipping archive");
        return Ok(None);
    }

    let entries = latest_by_name(&entries);
    let entry_count = entries.len();
    let bytes = tokio::task::spawn_blocking(move || builder.build(&entries))
        .await
        .map_err(|e| CompressorError::archive(format!("Task panicked: {e}")))??;

    info!("Built {file_name}: {entry_count} files, {} bytes", bytes.len());
    Ok(Some(Archive {
        file_name: file_name.to_string(),
        entry_count,
        bytes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::core::{ItemStore, SourceFile};

    #[derive(Default)]
    struct CountingBuilder {
        calls: AtomicUsize,
    }

    impl ArchiveBuilder for CountingBuilder {
        fn build(&self, entries: &[ArchiveEntry]) -> CompressorResult<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(entries.iter().map(|e| e.name.as_str()).collect::<Vec<_>>().join(",").into_bytes())
        }
    }

    fn entry(bytes: Vec<u8>) -> ArchiveEntry {
        ArchiveEntry { name: "x".into(), bytes: bytes.into() }
    }

    fn read_zip(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut content = Vec::new();
                file.read_to_end(&mut content).unwrap();
                (file.name().to_string(), content)
            })
            .collect()
    }

    #[test]
    fn only_done_entries_are_collected_in_order() {
        let store = ItemStore::new();
        let ids = store.add(["a.jpg", "b.png", "c.webp"].map(|name| {
            SourceFile::new(name, None, vec![0u8; 8])
        }));
        for id in [ids[0], ids[2]] {
            store.begin_processing(id).unwrap();
            store.complete(id, Ok(vec![1, 2, 3])).unwrap();
        }
        store.begin_processing(ids[1]).unwrap();

        let entries = collect_archive_entries(&store.snapshot(), "min_");
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["min_a.jpg", "min_c.webp"]);
    }

    #[tokio::test]
    async fn empty_input_skips_the_builder() {
        let builder = Arc::new(CountingBuilder::default());
        let archive = assemble_archive(builder.clone(), Vec::new(), "out.zip").await.unwrap();

        assert!(archive.is_none());
        assert_eq!(builder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn non_empty_input_builds_exactly_once() {
        let builder = Arc::new(CountingBuilder::default());
        let archive = assemble_archive(builder.clone(), vec![entry(vec![1])], "out.zip")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(builder.calls.load(Ordering::SeqCst), 1);
        assert_eq!(archive.file_name, "out.zip");
        assert_eq!(archive.entry_count, 1);
    }

    #[test]
    fn zip_contains_each_entry_verbatim() {
        let entries = vec![
            ArchiveEntry { name: "min_a.jpg".into(), bytes: Arc::from(&b"first"[..]) },
            ArchiveEntry { name: "min_b.png".into(), bytes: Arc::from(&b"second"[..]) },
        ];
        let bytes = ZipArchiveBuilder.build(&entries).unwrap();

        assert_eq!(
            read_zip(&bytes),
            vec![
                ("min_a.jpg".to_string(), b"first".to_vec()),
                ("min_b.png".to_string(), b"second".to_vec()),
            ]
        );
    }

    #[test]
    fn same_name_keeps_the_last_payload() {
        let entries = vec![
            ArchiveEntry { name: "min_a.jpg".into(), bytes: Arc::from(&b"1"[..]) },
            ArchiveEntry { name: "min_b.jpg".into(), bytes: Arc::from(&b"b"[..]) },
            ArchiveEntry { name: "min_a.jpg".into(), bytes: Arc::from(&b"2"[..]) },
        ];
        let bytes = ZipArchiveBuilder.build(&entries).unwrap();

        assert_eq!(
            read_zip(&bytes),
            vec![
                ("min_a.jpg".to_string(), b"2".to_vec()),
                ("min_b.jpg".to_string(), b"b".to_vec()),
            ]
        );
    }

    #[tokio::test]
    async fn entry_count_reflects_files_written() {
        let entries = vec![
            ArchiveEntry { name: "min_a.jpg".into(), bytes: Arc::from(&b"1"[..]) },
            ArchiveEntry { name: "min_a.jpg".into(), bytes: Arc::from(&b"2"[..]) },
        ];
        let archive = assemble_archive(Arc::new(ZipArchiveBuilder), entries, "out.zip")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(archive.entry_count, 1);
        assert_eq!(read_zip(&archive.bytes), vec![("min_a.jpg".to_string(), b"2".to_vec())]);
    }
}
