//! SAM/BAM record utilities.
//!
//! - [`builder`] - fluent builders for noodles records, headers and small BAM files, used to
//!   produce test data

pub mod builder;

pub use builder::{RecordBuilder, create_header, parse_cigar, write_bam};
