use std::path::Path;
use tokio::fs;
use crate::core::SourceFile;
use crate::utils::{CompressorResult, PathError, format_from_extension};

/// Returns the final path component, or the whole string when there is none.
pub fn extract_filename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

/// Checks that `path` exists and is a regular file.
pub async fn validate_input_path(path: impl AsRef<Path>) -> CompressorResult<()> {
    let path = path.as_ref();
    let metadata = match fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PathError::not_found(path).into());
        }
        Err(e) => return Err(PathError::from(e).into()),
    };

    if !metadata.is_file() {
        return Err(PathError::not_a_file(path).into());
    }
    Ok(())
}

/// Reads a file from disk into a [`SourceFile`].
///
/// The content type is declared from the extension. Unknown extensions are
/// still loaded, with no declared type, so the accept filter can report them.
pub async fn load_source_file(path: impl AsRef<Path>) -> CompressorResult<SourceFile> {
    let path = path.as_ref();
    validate_input_path(path).await?;

    let bytes = fs::read(path).await.map_err(PathError::from)?;
    let path_str = path.to_string_lossy();
    let content_type = format_from_extension(&path_str)
        .ok()
        .map(|f| f.content_type().to_string());

    Ok(SourceFile::new(extract_filename(&path_str), content_type, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{CompressorError, ImageFormat};

    #[test]
    fn filename_extraction() {
        assert_eq!(extract_filename("/tmp/a/photo.jpg"), "photo.jpg");
        assert_eq!(extract_filename("photo.jpg"), "photo.jpg");
    }

    #[tokio::test]
    async fn loads_file_with_declared_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cat.PNG");
        std::fs::write(&path, b"not really a png").unwrap();

        let file = load_source_file(&path).await.unwrap();
        assert_eq!(file.name, "Cat.PNG");
        assert_eq!(file.declared_format(), Some(ImageFormat::PNG));
        assert_eq!(file.len(), 16);
    }

    #[tokio::test]
    async fn unknown_extension_loads_without_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let file = load_source_file(&path).await.unwrap();
        assert_eq!(file.content_type, None);
    }

    #[tokio::test]
    async fn missing_and_directory_paths_fail() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_source_file(dir.path().join("nope.jpg")).await.unwrap_err();
        assert!(matches!(err, CompressorError::Path(PathError::NotFound(_))));

        let err = load_source_file(dir.path()).await.unwrap_err();
        assert!(matches!(err, CompressorError::Path(PathError::NotFile(_))));
    }
}
