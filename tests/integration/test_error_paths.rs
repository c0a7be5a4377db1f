//! Failure modes of the `readstats` binary. A failed run must exit non-zero and leave no reports.

use readstats_lib::sam::builder::RecordBuilder;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

use crate::helpers::{scenario_records, write_bed, write_test_bam};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_readstats"))
        .args(args)
        .output()
        .expect("Failed to run readstats")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

fn assert_failed(output: &Output, message: &str) {
    assert!(!output.status.success(), "expected failure, got {}", output.status);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(message), "stderr did not mention '{message}':\n{stderr}");
}

#[test]
fn test_missing_bam_argument() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    let output = run(&["--output", path_str(&out)]);

    assert_failed(&output, "--bam");
    assert!(!out.exists());
}

#[test]
fn test_missing_bam_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let bam = dir.path().join("missing.bam");

    let output = run(&["--bam", path_str(&bam), "--output", path_str(&out)]);

    assert_failed(&output, "File does not exist");
    assert!(!out.exists());
}

#[test]
fn test_missing_bed_file() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    write_test_bam(&bam, &scenario_records());
    let out = dir.path().join("out");
    let bed = dir.path().join("missing.bed");

    let output =
        run(&["--bam", path_str(&bam), "--bed", path_str(&bed), "--output", path_str(&out)]);

    assert_failed(&output, "Invalid BED file");
    assert!(!out.exists());
}

#[test]
fn test_malformed_bed() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    let bed = dir.path().join("regions.bed");
    write_test_bam(&bam, &scenario_records());
    write_bed(&bed, &["chr1\t100\t200", "chr1\tabc\t300"]);
    let out = dir.path().join("out");

    let output =
        run(&["--bam", path_str(&bam), "--bed", path_str(&bed), "--output", path_str(&out)]);

    assert_failed(&output, "line 2");
    assert!(!out.exists());
}

#[test]
fn test_output_is_a_file() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    write_test_bam(&bam, &scenario_records());
    let out = dir.path().join("out.txt");
    fs::write(&out, "occupied").unwrap();

    let output = run(&["--bam", path_str(&bam), "--output", path_str(&out)]);

    assert_failed(&output, "not a directory");
    assert_eq!(fs::read_to_string(&out).unwrap(), "occupied");
}

#[test]
fn test_not_a_bam_file() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    fs::write(&bam, "this is not a BAM file\n").unwrap();
    let out = dir.path().join("out");

    let output = run(&["--bam", path_str(&bam), "--output", path_str(&out)]);

    assert!(!output.status.success());
    assert!(!out.exists());
}

#[test]
fn test_zero_threads_rejected() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    write_test_bam(&bam, &scenario_records());
    let out = dir.path().join("out");

    let output = run(&["--bam", path_str(&bam), "--output", path_str(&out), "--threads", "0"]);

    assert_failed(&output, "threads");
    assert!(!out.exists());
}

#[test]
fn test_mapped_read_without_position_aborts() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("input.bam");
    let mut records = scenario_records();
    records.push(RecordBuilder::mapped_read().name("BAD").sequence("ACGTACGT").build());
    write_test_bam(&bam, &records);
    let out = dir.path().join("out");

    let output = run(&["--bam", path_str(&bam), "--output", path_str(&out)]);

    assert_failed(&output, "BAD");
    assert!(!out.exists());
}
