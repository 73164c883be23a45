//! Integration tests for the expand command.

use crate::helpers::{read, run_err, run_ok, stlift, write_file, ALIGNED_BED, ASSEMBLY_FASTA, PERBASE_ROWS};
use tempfile::TempDir;

#[test]
fn test_expand_writes_per_base_rows_with_intron_gap() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "aligned.bed", ALIGNED_BED);
    let assembly = write_file(dir.path(), "assembly.fa", ASSEMBLY_FASTA);
    let output = dir.path().join("perbase.bed");

    run_ok(stlift().args([
        "expand",
        "-i",
        input.to_str().unwrap(),
        "-f",
        assembly.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]));

    assert_eq!(read(&output), PERBASE_ROWS);
}

#[test]
fn test_expand_reverse_strand_counts_from_contig_end() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "aligned.bed", "chr1\t100\t103\tSTRG.2\t60\t-\t3M\n");
    let assembly = write_file(dir.path(), "assembly.fa", ">STRG.2\nACGTA\n");
    let output = dir.path().join("perbase.bed");

    run_ok(stlift().args([
        "expand",
        "-i",
        input.to_str().unwrap(),
        "-f",
        assembly.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]));

    // The 5-base contig aligns reversed, so positions descend from 5
    assert_eq!(
        read(&output),
        "chr1\t100\t101\t-\tSTRG.2\t5\n\
         chr1\t101\t102\t-\tSTRG.2\t4\n\
         chr1\t102\t103\t-\tSTRG.2\t3\n"
    );
}

#[test]
fn test_expand_aligned_only_drops_soft_clipped_bases() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "aligned.bed", "chr1\t100\t105\tSTRG.1\t60\t+\t2S3M\n");
    let assembly = write_file(dir.path(), "assembly.fa", ASSEMBLY_FASTA);
    let output = dir.path().join("perbase.bed");

    run_ok(stlift().args([
        "expand",
        "-i",
        input.to_str().unwrap(),
        "-f",
        assembly.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--emit",
        "aligned-only",
    ]));

    // The clip still advances both cursors, so the M block starts at
    // target 102 / contig position 3
    assert_eq!(
        read(&output),
        "chr1\t102\t103\t+\tSTRG.1\t3\n\
         chr1\t103\t104\t+\tSTRG.1\t4\n\
         chr1\t104\t105\t+\tSTRG.1\t5\n"
    );
}

#[test]
fn test_expand_unknown_contig_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "aligned.bed", "chr1\t100\t103\tSTRG.9\t60\t+\t3M\n");
    let assembly = write_file(dir.path(), "assembly.fa", ASSEMBLY_FASTA);
    let output = dir.path().join("perbase.bed");

    let stderr = run_err(stlift().args([
        "expand",
        "-i",
        input.to_str().unwrap(),
        "-f",
        assembly.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]));

    assert!(stderr.contains("Contig 'STRG.9' not found"), "stderr: {stderr}");
}

#[test]
fn test_expand_skip_and_report_keeps_good_records() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        dir.path(),
        "aligned.bed",
        "chr1\t100\t103\tSTRG.1\t60\t+\t3Z\nchr1\t100\t103\tSTRG.1\t60\t+\t3M\n",
    );
    let assembly = write_file(dir.path(), "assembly.fa", ASSEMBLY_FASTA);
    let output = dir.path().join("perbase.bed");

    run_ok(stlift().args([
        "expand",
        "-i",
        input.to_str().unwrap(),
        "-f",
        assembly.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--on-error",
        "skip-and-report",
    ]));

    assert_eq!(
        read(&output),
        "chr1\t100\t101\t+\tSTRG.1\t1\n\
         chr1\t101\t102\t+\tSTRG.1\t2\n\
         chr1\t102\t103\t+\tSTRG.1\t3\n"
    );
}
