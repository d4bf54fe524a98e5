use crate::config::CompressorConfig;
use crate::core::SourceFile;
use crate::utils::{CompressorError, CompressorResult, ImageFormat, ValidationError};

/// Checks that a submitted file declares one of the accepted image types.
pub fn validate_source_file(file: &SourceFile) -> CompressorResult<ImageFormat> {
    match (&file.content_type, file.declared_format()) {
        (_, Some(format)) => Ok(format),
        (Some(content_type), None) => Err(CompressorError::format(format!(
            "{}: unsupported type {content_type}", file.name
        ))),
        (None, None) => Err(CompressorError::format(format!(
            "{}: no declared type", file.name
        ))),
    }
}

/// Validates a quality value, returning it unchanged when it lies in (0, 1].
pub fn validate_quality(quality: f32) -> CompressorResult<f32> {
    if !quality.is_finite() || quality <= 0.0 || quality > 1.0 {
        return Err(ValidationError::Quality(quality).into());
    }
    Ok(quality)
}

/// Validates compressor configuration
pub fn validate_config(config: &CompressorConfig) -> CompressorResult<()> {
    validate_quality(config.default_quality)?;

    if config.max_dimension == 0 {
        return Err(CompressorError::settings("maxDimension cannot be 0"));
    }

    if config.confirm_window_ms == 0 {
        return Err(CompressorError::settings("confirmWindowMs cannot be 0"));
    }

    if config.archive_name.trim().is_empty() {
        return Err(CompressorError::settings("archiveName cannot be empty"));
    }

    Ok(())
}
