//! Integration tests for the depth command.

use crate::helpers::{read, run_err, run_ok, stlift, write_file};
use tempfile::TempDir;

#[test]
fn test_depth_normalizes_positions_to_intervals() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        dir.path(),
        "depth.txt",
        "STRG.1\t0\t300\t107\t23\nSTRG.1\t0\t300\t108\t25\nSTRG.2\t0\t50\t1\t4\n",
    );
    let output = dir.path().join("reformat_depth.txt");

    run_ok(stlift().args([
        "depth",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]));

    assert_eq!(
        read(&output),
        "STRG.1\t106\t107\t23\nSTRG.1\t107\t108\t25\nSTRG.2\t0\t1\t4\n"
    );
}

#[test]
fn test_depth_fails_fast_on_short_row() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "depth.txt", "STRG.1\t0\t300\t107\n");
    let output = dir.path().join("reformat_depth.txt");

    let stderr = run_err(stlift().args([
        "depth",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]));

    assert!(stderr.contains("Malformed depth record at line 1"), "stderr: {stderr}");
}

#[test]
fn test_depth_skip_and_report_keeps_good_rows() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        dir.path(),
        "depth.txt",
        "STRG.1\t0\t300\t107\t23\nbad row\nSTRG.1\t0\t300\t109\t11\n",
    );
    let output = dir.path().join("reformat_depth.txt");

    run_ok(stlift().args([
        "depth",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--on-error",
        "skip-and-report",
    ]));

    assert_eq!(read(&output), "STRG.1\t106\t107\t23\nSTRG.1\t108\t109\t11\n");
}
