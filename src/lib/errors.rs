//! Custom error types for readstats operations.

use thiserror::Error;

/// Result type alias for readstats operations
pub type Result<T> = std::result::Result<T, ReadStatsError>;

/// Error type for readstats operations
#[derive(Error, Debug)]
pub enum ReadStatsError {
    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// Missing or malformed input source (BAM, BED, output directory)
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g., "BAM", "BED")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// A read flagged as mapped lacks a coordinate needed for the overlap join
    #[error("Read '{read_id}' is mapped but has no {field}")]
    MissingCoordinates {
        /// The read name
        read_id: String,
        /// The missing field (e.g., "reference sequence", "alignment start")
        field: &'static str,
    },

    /// A record refers to a reference sequence id that is not in the header
    #[error("Reference sequence id {ref_id} not found in header (read '{read_id}')")]
    ReferenceNotFound {
        /// The read name
        read_id: String,
        /// The reference sequence id
        ref_id: usize,
    },
}
