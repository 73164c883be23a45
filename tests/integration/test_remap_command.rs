//! Integration tests for the remap command.

use crate::helpers::{read, run_err, run_ok, stlift, write_file};
use tempfile::TempDir;

const EXONIC_ROWS: &str = "chr1\t101\t102\t+\tSTRG.1\t2\nchr1\t102\t103\t+\tSTRG.1\t3\n";

#[test]
fn test_remap_extended_carries_genomic_anchor() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "exons_perbase.bed", EXONIC_ROWS);
    let output = dir.path().join("supertscoords.bed");

    run_ok(stlift().args([
        "remap",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]));

    assert_eq!(
        read(&output),
        "STRG.1\t1\t2\tchr1\t101\t102\t+\nSTRG.1\t2\t3\tchr1\t102\t103\t+\n"
    );
}

#[test]
fn test_remap_minimal_is_three_columns() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "exons_perbase.bed", EXONIC_ROWS);
    let output = dir.path().join("positions.bed");

    run_ok(stlift().args([
        "remap",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--mode",
        "minimal",
    ]));

    assert_eq!(read(&output), "STRG.1\t1\t2\nSTRG.1\t2\t3\n");
}

#[test]
fn test_remap_tolerates_appended_exon_columns() {
    // intersect variants that append the matched B interval still remap
    // on the first six columns
    let dir = TempDir::new().unwrap();
    let input =
        write_file(dir.path(), "exons_perbase.bed", "chr1\t101\t102\t+\tSTRG.1\t2\tchr1\t101\t105\n");
    let output = dir.path().join("supertscoords.bed");

    run_ok(stlift().args([
        "remap",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]));

    assert_eq!(read(&output), "STRG.1\t1\t2\tchr1\t101\t102\t+\n");
}

#[test]
fn test_remap_fails_fast_on_non_numeric_position() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "exons_perbase.bed", "chr1\t101\t102\t+\tSTRG.1\tx\n");
    let output = dir.path().join("supertscoords.bed");

    let stderr = run_err(stlift().args([
        "remap",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]));

    assert!(stderr.contains("at line 1"), "stderr: {stderr}");
}
