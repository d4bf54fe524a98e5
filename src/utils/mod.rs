pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;

pub use error::{CompressorError, CompressorResult, PathError, ValidationError};
pub use validation::{validate_config, validate_quality, validate_source_file};
pub use formats::{ImageFormat, format_from_extension};
pub use fs::{extract_filename, load_source_file, validate_input_path};
