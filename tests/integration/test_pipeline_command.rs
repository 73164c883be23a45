//! End-to-end pipeline runs against the fake external tools.

use crate::helpers::{
    install_fake_bedtools, install_fake_vcftools, install_failing_bedtools, read, run_err, run_ok,
    stlift, write_file, ALIGNED_BED, ASSEMBLY_FASTA, CALLS_VCF, DEPTH_TRACK, EXONS_BED,
    PERBASE_ROWS,
};
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

struct PipelineFixture {
    dir: TempDir,
    out: PathBuf,
}

impl PipelineFixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        write_file(dir.path(), "aligned.bed", ALIGNED_BED);
        write_file(dir.path(), "assembly.fa", ASSEMBLY_FASTA);
        write_file(dir.path(), "exons.bed", EXONS_BED);
        write_file(dir.path(), "depth.txt", DEPTH_TRACK);
        write_file(dir.path(), "calls.vcf", CALLS_VCF);
        Self { dir, out }
    }

    fn input(&self, name: &str) -> String {
        self.dir.path().join(name).to_str().unwrap().to_string()
    }

    fn command(&self) -> Command {
        let bedtools = install_fake_bedtools(self.dir.path());
        let vcftools = install_fake_vcftools(self.dir.path());
        let mut cmd = stlift();
        cmd.args([
            "pipeline",
            "-i",
            &self.input("aligned.bed"),
            "-f",
            &self.input("assembly.fa"),
            "-e",
            &self.input("exons.bed"),
            "-d",
            &self.input("depth.txt"),
            "-v",
            &self.input("calls.vcf"),
            "-o",
            "perbase.bed",
            "--output-dir",
            self.out.to_str().unwrap(),
            "--bedtools",
            bedtools.to_str().unwrap(),
            "--vcftools",
            vcftools.to_str().unwrap(),
        ]);
        cmd
    }

    fn artifact(&self, name: &str) -> PathBuf {
        self.out.join(name)
    }
}

#[test]
fn test_pipeline_single_copy_writes_all_artifacts() {
    let fixture = PipelineFixture::new();
    run_ok(&mut fixture.command());

    assert_eq!(
        read(&fixture.artifact("reformat_depth.txt")),
        "STRG.1\t1\t2\t7\nSTRG.1\t2\t3\t9\nSTRG.1\t8\t9\t4\n"
    );
    assert_eq!(read(&fixture.artifact("perbase.bed")), PERBASE_ROWS);
    assert_eq!(
        read(&fixture.artifact("exons_perbase.bed")),
        "chr1\t101\t102\t+\tSTRG.1\t2\n\
         chr1\t102\t103\t+\tSTRG.1\t3\n\
         chr1\t104\t105\t+\tSTRG.1\t4\n"
    );
    assert_eq!(
        read(&fixture.artifact("supertscoords_exons_perbase.bed")),
        "STRG.1\t1\t2\tchr1\t101\t102\t+\n\
         STRG.1\t2\t3\tchr1\t102\t103\t+\n\
         STRG.1\t3\t4\tchr1\t104\t105\t+\n"
    );
    assert_eq!(
        read(&fixture.artifact("wdepth_supertscoords_exons_perbase.bed")),
        "STRG.1\t1\t2\tchr1\t101\t102\t+\t7\n\
         STRG.1\t2\t3\tchr1\t102\t103\t+\t9\n\
         STRG.1\t3\t4\tchr1\t104\t105\t+\t.\n"
    );
    assert_eq!(read(&fixture.artifact("callable_sites")), "2\n");

    // vcftools kept the two exonic calls; the bridge re-split them
    assert_eq!(
        read(&fixture.artifact("exonsonly.recode.vcf")),
        "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\n\
         STRG.1\t2\t.\tA\tG\nSTRG.1\t4\t.\tC\tT\n"
    );
    assert_eq!(
        read(&fixture.artifact("exonsonly.recode.bed")),
        "STRG.1\t1\t2\t.\tA\tG\nSTRG.1\t3\t4\t.\tC\tT\n"
    );
    assert_eq!(
        read(&fixture.artifact("wGenomePosDepth_exonsonly.recode.bed")),
        "STRG.1\t1\t2\t.\tA\tG\t7\nSTRG.1\t3\t4\t.\tC\tT\t.\n"
    );

    let metrics = read(&fixture.artifact("pipeline_metrics.txt"));
    let mut lines = metrics.lines();
    let header = lines.next().unwrap();
    let row = lines.next().unwrap();
    assert!(header.starts_with("contigs_indexed\t"), "header: {header}");
    assert!(row.ends_with("\t2\t2"), "row: {row}");
}

#[test]
fn test_pipeline_polyploid_round_trips_exonic_calls() {
    let fixture = PipelineFixture::new();
    run_ok(fixture.command().arg("--polyploid"));

    assert_eq!(
        read(&fixture.artifact("exons_calls.bed")),
        "STRG.1\t1\t2\t.\tA\tG\nSTRG.1\t3\t4\t.\tC\tT\n"
    );
    assert_eq!(
        read(&fixture.artifact("exons_calls.vcf")),
        "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\n\
         STRG.1\t2\t.\tA\tG\nSTRG.1\t4\t.\tC\tT\n"
    );
    assert_eq!(
        read(&fixture.artifact("wGenomePosDepth_exons_calls.bed")),
        "STRG.1\t1\t2\t.\tA\tG\t7\nSTRG.1\t3\t4\t.\tC\tT\t.\n"
    );
    // The single-copy restriction artifacts are never produced
    assert!(!fixture.artifact("exonsonly.recode.vcf").exists());
}

#[test]
fn test_pipeline_aborts_before_artifacts_when_bedtools_is_missing() {
    let fixture = PipelineFixture::new();
    let vcftools = install_fake_vcftools(fixture.dir.path());

    let mut cmd = stlift();
    cmd.args([
        "pipeline",
        "-i",
        &fixture.input("aligned.bed"),
        "-f",
        &fixture.input("assembly.fa"),
        "-e",
        &fixture.input("exons.bed"),
        "-d",
        &fixture.input("depth.txt"),
        "-v",
        &fixture.input("calls.vcf"),
        "-o",
        "perbase.bed",
        "--output-dir",
        fixture.out.to_str().unwrap(),
        "--bedtools",
        "/no/such/bedtools",
        "--vcftools",
        vcftools.to_str().unwrap(),
    ]);
    let stderr = run_err(&mut cmd);

    assert!(stderr.contains("Required tool 'bedtools'"), "stderr: {stderr}");
    assert!(!fixture.out.exists(), "no artifact should be written");
}

#[test]
fn test_pipeline_surfaces_tool_stderr_on_mid_run_failure() {
    let fixture = PipelineFixture::new();
    let bedtools = install_failing_bedtools(fixture.dir.path());
    let vcftools = install_fake_vcftools(fixture.dir.path());

    let mut cmd = stlift();
    cmd.args([
        "pipeline",
        "-i",
        &fixture.input("aligned.bed"),
        "-f",
        &fixture.input("assembly.fa"),
        "-e",
        &fixture.input("exons.bed"),
        "-d",
        &fixture.input("depth.txt"),
        "-v",
        &fixture.input("calls.vcf"),
        "-o",
        "perbase.bed",
        "--output-dir",
        fixture.out.to_str().unwrap(),
        "--bedtools",
        bedtools.to_str().unwrap(),
        "--vcftools",
        vcftools.to_str().unwrap(),
    ]);
    let stderr = run_err(&mut cmd);

    assert!(stderr.contains("bedtools intersect failed"), "stderr: {stderr}");
    assert!(stderr.contains("chromOrder"), "stderr: {stderr}");
    // The stages before the failing intersect ran to completion
    assert_eq!(read(&fixture.artifact("perbase.bed")), PERBASE_ROWS);
    assert!(!fixture.artifact("supertscoords_exons_perbase.bed").exists());
}

#[test]
fn test_pipeline_rejects_bed_out_with_path_separator() {
    let fixture = PipelineFixture::new();
    let bedtools = install_fake_bedtools(fixture.dir.path());
    let vcftools = install_fake_vcftools(fixture.dir.path());

    let mut cmd = stlift();
    cmd.args([
        "pipeline",
        "-i",
        &fixture.input("aligned.bed"),
        "-f",
        &fixture.input("assembly.fa"),
        "-e",
        &fixture.input("exons.bed"),
        "-d",
        &fixture.input("depth.txt"),
        "-v",
        &fixture.input("calls.vcf"),
        "-o",
        "sub/perbase.bed",
        "--output-dir",
        fixture.out.to_str().unwrap(),
        "--bedtools",
        bedtools.to_str().unwrap(),
        "--vcftools",
        vcftools.to_str().unwrap(),
    ]);
    let stderr = run_err(&mut cmd);

    assert!(stderr.contains("bare file name"), "stderr: {stderr}");
}
