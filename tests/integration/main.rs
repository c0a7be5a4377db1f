//! Integration tests for readstats.
//!
//! These tests run the compiled binary and the library pipeline end to end on BAM and BED
//! files generated in temporary directories.

mod helpers;
mod test_error_paths;
mod test_library_pipeline;
mod test_stats_command;
