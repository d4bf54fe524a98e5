//! Error types for the image compressor.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use serde::Serialize;

/// Validation errors for settings and configuration.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum ValidationError {
    /// Quality outside (0, 1] or not a finite number
    #[error("Invalid quality {0}: must be greater than 0 and at most 1")]
    Quality(f32),
    /// Invalid configuration value
    #[error("Settings error: {0}")]
    Settings(String),
}

/// File path errors at the input boundary.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum PathError {
    /// File does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    /// Path exists but is not a file
    #[error("Not a file: {0}")]
    NotFile(PathBuf),
    /// IO error accessing the path
    #[error("IO error: {0}")]
    IO(String),
}

/// Main error type for the compressor.
///
/// Codec failures are recorded on the entry that produced them and never
/// escape a batch run; every other variant is returned to the caller.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum CompressorError {
    /// Settings or configuration validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Input path problems when loading files from disk
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    /// The codec could not produce output for an entry
    #[error("Compression failed: {0}")]
    CompressionFailed(String),

    /// A batch run is already in flight
    #[error("A batch run is already in progress")]
    Busy,

    /// Archive assembly failed
    #[error("Archive error: {0}")]
    Archive(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),

    /// Unsupported or undeclared image format
    #[error("Format error: {0}")]
    Format(String),
}

/// Convenience result type for compressor operations.
pub type CompressorResult<T> = Result<T, CompressorError>;

// Helper methods for error creation
impl CompressorError {
    pub fn compression<T: Into<String>>(msg: T) -> Self {
        Self::CompressionFailed(msg.into())
    }

    pub fn archive<T: Into<String>>(msg: T) -> Self {
        Self::Archive(msg.into())
    }

    pub fn format<T: Into<String>>(msg: T) -> Self {
        Self::Format(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::IO(msg.into())
    }

    pub fn settings<T: Into<String>>(msg: T) -> Self {
        Self::Validation(ValidationError::settings(msg))
    }
}

// Helper methods for validation error creation
impl ValidationError {
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}

impl PathError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::NotFile(path.into())
    }
}

// Convert std::io::Error to CompressorError
impl From<io::Error> for CompressorError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Convert io::Error to PathError
impl From<io::Error> for PathError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// The zip writer only fails while assembling an archive
impl From<zip::result::ZipError> for CompressorError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_convert_into_compressor_error() {
        let err: CompressorError = ValidationError::Quality(1.5).into();
        assert_eq!(err, CompressorError::Validation(ValidationError::Quality(1.5)));
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn io_errors_keep_their_message() {
        let err: CompressorError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err, CompressorError::IO("denied".to_string()));
    }

    #[test]
    fn errors_serialize_for_frontends() {
        let json = serde_json::to_value(CompressorError::Busy).unwrap();
        assert_eq!(json, serde_json::json!("Busy"));

        let json = serde_json::to_value(CompressorError::compression("bad header")).unwrap();
        assert_eq!(json, serde_json::json!({ "CompressionFailed": "bad header" }));
    }
}
