//! Integration tests for the join command, run against a fake bedtools.

use crate::helpers::{install_fake_bedtools, read, run_ok, stlift, write_file};
use tempfile::TempDir;

const POSITIONS: &str = "STRG.1\t1\t2\tchr1\t101\t102\t+\n\
                         STRG.1\t2\t3\tchr1\t102\t103\t+\n\
                         STRG.1\t3\t4\tchr1\t104\t105\t+\n";

const DEPTH: &str = "STRG.1\t1\t2\t7\nSTRG.1\t2\t3\t9\nSTRG.1\t8\t9\t4\n";

#[test]
fn test_join_per_site_appends_depth_with_sentinel() {
    let dir = TempDir::new().unwrap();
    let bedtools = install_fake_bedtools(dir.path());
    let positions = write_file(dir.path(), "positions.bed", POSITIONS);
    let depth = write_file(dir.path(), "depth.bed", DEPTH);
    let output = dir.path().join("wdepth.bed");

    run_ok(stlift().args([
        "join",
        "-a",
        positions.to_str().unwrap(),
        "-b",
        depth.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--bedtools",
        bedtools.to_str().unwrap(),
    ]));

    assert_eq!(
        read(&output),
        "STRG.1\t1\t2\tchr1\t101\t102\t+\t7\n\
         STRG.1\t2\t3\tchr1\t102\t103\t+\t9\n\
         STRG.1\t3\t4\tchr1\t104\t105\t+\t.\n"
    );
    // The raw engine output is projected into the final file and removed
    assert!(!dir.path().join("wdepth.bed.loj").exists());
}

#[test]
fn test_join_count_keeps_covered_positions() {
    let dir = TempDir::new().unwrap();
    let bedtools = install_fake_bedtools(dir.path());
    let positions = write_file(dir.path(), "positions.bed", POSITIONS);
    let depth = write_file(dir.path(), "depth.bed", DEPTH);
    let output = dir.path().join("covered.bed");

    run_ok(stlift().args([
        "join",
        "-a",
        positions.to_str().unwrap(),
        "-b",
        depth.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--mode",
        "count",
        "--bedtools",
        bedtools.to_str().unwrap(),
    ]));

    assert_eq!(
        read(&output),
        "STRG.1\t1\t2\tchr1\t101\t102\t+\nSTRG.1\t2\t3\tchr1\t102\t103\t+\n"
    );
}
