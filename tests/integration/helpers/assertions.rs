//! Helpers for reading and checking report files.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Reads a TSV file into a header and data rows.
///
/// # Panics
///
/// Panics if the file cannot be read.
pub fn read_tsv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    let mut lines = content.lines();
    let header = lines.next().map(split_tsv).unwrap_or_default();
    let rows = lines.map(split_tsv).collect();
    (header, rows)
}

fn split_tsv(line: &str) -> Vec<String> {
    line.split('\t').map(str::to_string).collect()
}

/// Returns the values of `column` in a TSV file, in row order.
///
/// # Panics
///
/// Panics if the column is not present.
pub fn tsv_column(path: &Path, column: &str) -> Vec<String> {
    let (header, rows) = read_tsv(path);
    let idx = header
        .iter()
        .position(|h| h == column)
        .unwrap_or_else(|| panic!("Column {column} not found in {}", path.display()));
    rows.into_iter().map(|mut row| row.swap_remove(idx)).collect()
}

/// Asserts the `Overlap` column of an `output.tsv`.
///
/// # Panics
///
/// Panics if the column differs from `expected`.
pub fn assert_overlap_column(path: &Path, expected: &[&str]) {
    assert_eq!(tsv_column(path, "Overlap"), expected, "Overlap column of {}", path.display());
}
