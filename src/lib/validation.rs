//! Input validation utilities
//!
//! Checks on command-line parameters and paths, run before any input is read so that a bad
//! invocation fails fast and writes nothing.

use crate::errors::{ReadStatsError, Result};
use std::path::Path;

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "BAM", "BED")
///
/// # Errors
/// Returns an error if the path does not exist or is not a file
///
/// # Example
/// ```
/// use readstats_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/file.bam", "BAM");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    let reason = if !path_ref.exists() {
        "File does not exist"
    } else if !path_ref.is_file() {
        "Path is not a file"
    } else {
        return Ok(());
    };
    Err(ReadStatsError::InvalidFileFormat {
        file_type: description.to_string(),
        path: path_ref.display().to_string(),
        reason: reason.to_string(),
    })
}

/// Validate that an output directory either exists as a directory or can be created
///
/// Nothing is created here; an existing non-directory path is rejected.
///
/// # Errors
/// Returns an error if the path exists and is not a directory
pub fn validate_output_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path_ref = path.as_ref();
    if path_ref.exists() && !path_ref.is_dir() {
        return Err(ReadStatsError::InvalidParameter {
            parameter: "output".to_string(),
            reason: format!("'{}' exists and is not a directory", path_ref.display()),
        });
    }
    Ok(())
}

/// Validate that a count-like parameter is at least 1
///
/// # Errors
/// Returns an error if `value` is 0
///
/// # Example
/// ```
/// use readstats_lib::validation::validate_positive;
///
/// assert!(validate_positive(4, "threads").is_ok());
/// assert!(validate_positive(0, "threads").is_err());
/// ```
pub fn validate_positive(value: usize, name: &str) -> Result<()> {
    if value == 0 {
        return Err(ReadStatsError::InvalidParameter {
            parameter: name.to_string(),
            reason: "must be >= 1".to_string(),
        });
    }
    Ok(())
}
