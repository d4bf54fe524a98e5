//! Compressor configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields a usable configuration.

use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::utils::{CompressorError, CompressorResult, validate_config};

/// Quality used when the caller does not pick one
pub const DEFAULT_QUALITY: f32 = 0.8;
/// Longest output side in pixels, independent of quality
pub const DEFAULT_MAX_DIMENSION: u32 = 1920;
/// How long a first clear-all press stays armed
pub const DEFAULT_CONFIRM_WINDOW_MS: u64 = 3000;
pub const DEFAULT_ARCHIVE_NAME: &str = "images-compressed.zip";
pub const DEFAULT_OUTPUT_PREFIX: &str = "min_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompressorConfig {
    /// Quality in (0, 1] applied when a run does not specify one
    pub default_quality: f32,
    /// Maximum width or height of compressed output
    pub max_dimension: u32,
    /// Clear-all disarm window in milliseconds
    pub confirm_window_ms: u64,
    /// Suggested file name for the downloadable archive
    pub archive_name: String,
    /// Prefix applied to each display name inside the archive
    pub output_prefix: String,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            default_quality: DEFAULT_QUALITY,
            max_dimension: DEFAULT_MAX_DIMENSION,
            confirm_window_ms: DEFAULT_CONFIRM_WINDOW_MS,
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }
}

impl CompressorConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> CompressorResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CompressorError::settings(format!("Malformed configuration: {e}")))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Loads configuration from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> CompressorResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CompressorError::io(format!("Cannot read config '{}': {e}", path.display())))?;

        let config = Self::from_json(&json)?;
        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Loads from `path` when given, otherwise returns the defaults.
    pub async fn load_or_default(path: Option<&Path>) -> CompressorResult<Self> {
        match path {
            Some(path) => Self::load(path).await,
            None => Ok(Self::default()),
        }
    }

    pub fn confirm_window(&self) -> Duration {
        Duration::from_millis(self.confirm_window_ms)
    }
}
