//! Error surfaces shared across subcommands: missing inputs, malformed
//! records, and the fail-fast default.

use crate::helpers::{run_err, stlift, write_file, ASSEMBLY_FASTA};
use tempfile::TempDir;

#[test]
fn test_expand_missing_input_names_the_file() {
    let dir = TempDir::new().unwrap();
    let assembly = write_file(dir.path(), "assembly.fa", ASSEMBLY_FASTA);
    let missing = dir.path().join("absent.bed");
    let output = dir.path().join("perbase.bed");

    let stderr = run_err(stlift().args([
        "expand",
        "-i",
        missing.to_str().unwrap(),
        "-f",
        assembly.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]));

    assert!(stderr.contains("Invalid Alignment BED file"), "stderr: {stderr}");
    assert!(stderr.contains("File does not exist"), "stderr: {stderr}");
}

#[test]
fn test_expand_fails_fast_on_unrecognized_cigar_operation() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "aligned.bed", "chr1\t100\t106\tSTRG.1\t60\t+\t3Q2M\n");
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

    assert!(stderr.contains("Malformed CIGAR '3Q2M'"), "stderr: {stderr}");
    assert!(stderr.contains("unrecognized operation 'Q'"), "stderr: {stderr}");
}

#[test]
fn test_vcf2bed_reports_truncated_row_with_line_number() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "calls.vcf", "##fileformat=VCFv4.2\n#CHROM\tPOS\nSTRG.1\n");
    let output = dir.path().join("calls.bed");

    let stderr = run_err(stlift().args([
        "vcf2bed",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]));

    assert!(stderr.contains("Malformed variant record at line 3"), "stderr: {stderr}");
}

#[test]
fn test_bed2vcf_requires_the_header_sidecar() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "calls.bed", "STRG.1\t1\t2\t.\tA\tG\n");
    let missing = dir.path().join("absent.header");
    let output = dir.path().join("calls.vcf");

    let stderr = run_err(stlift().args([
        "bed2vcf",
        "-i",
        input.to_str().unwrap(),
        "--header",
        missing.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]));

    assert!(stderr.contains("Invalid Header sidecar file"), "stderr: {stderr}");
}

#[test]
fn test_pipeline_checks_inputs_before_probing_tools() {
    let dir = TempDir::new().unwrap();
    let aligned = write_file(dir.path(), "aligned.bed", "chr1\t100\t106\tSTRG.1\t60\t+\t6M\n");
    let assembly = write_file(dir.path(), "assembly.fa", ASSEMBLY_FASTA);
    let exons = write_file(dir.path(), "exons.bed", "chr1\t101\t105\n");
    let depth = write_file(dir.path(), "depth.txt", "STRG.1\t0\t10\t2\t7\n");
    let vcf = dir.path().join("absent.vcf");
    let out = dir.path().join("out");

    // The bogus tool path is never probed because input validation runs first.
    let stderr = run_err(stlift().args([
        "pipeline",
        "-i",
        aligned.to_str().unwrap(),
        "-f",
        assembly.to_str().unwrap(),
        "-e",
        exons.to_str().unwrap(),
        "-d",
        depth.to_str().unwrap(),
        "-v",
        vcf.to_str().unwrap(),
        "-o",
        "perbase.bed",
        "--output-dir",
        out.to_str().unwrap(),
        "--bedtools",
        "/no/such/bedtools",
    ]));

    assert!(stderr.contains("Invalid VCF file"), "stderr: {stderr}");
    assert!(!stderr.contains("Required tool"), "stderr: {stderr}");
    assert!(!out.exists());
}

#[test]
fn test_skip_and_report_is_not_silent() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        dir.path(),
        "depth.txt",
        "STRG.1\t0\t10\tnotanumber\t7\nSTRG.1\t0\t10\t3\t9\n",
    );
    let output = dir.path().join("reformat.txt");

    let mut cmd = stlift();
    cmd.args([
        "depth",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--on-error",
        "skip-and-report",
    ]);
    let run = cmd.output().unwrap();
    assert!(run.status.success());
    let stderr = String::from_utf8_lossy(&run.stderr);

    assert!(stderr.contains("line 1"), "stderr: {stderr}");
    assert!(
        std::fs::read_to_string(&output).unwrap().contains("STRG.1\t2\t3\t9"),
        "good rows still convert"
    );
}
