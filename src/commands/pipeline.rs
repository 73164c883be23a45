//! Run the full SuperTranscript-to-genome conversion pipeline.

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use stlift_lib::pipeline::{PipelineConfig, PloidyMode};
use stlift_lib::validation::validate_files_exist;

use crate::commands::command::Command;
use crate::commands::common::{EmissionPolicyArg, EngineOptions, ErrorHandlingOptions};

/// Run the full SuperTranscript-to-genome conversion pipeline.
#[derive(Debug, Parser)]
#[command(
    name = "pipeline",
    about = "\x1b[38;5;173m[PIPELINE]\x1b[0m       \x1b[36mRun the full SuperTranscript-to-genome conversion pipeline\x1b[0m",
    long_about = r#"
Run the full SuperTranscript-to-genome conversion pipeline.

Starting from an assembly-to-genome alignment BED, an assembly FASTA, an
exon BED (sorted and merged; see `stlift prepare`), a per-base depth track,
and variant calls over the assembly, the pipeline writes into the output
directory:

  reformat_<depth>                      normalized depth intervals
  <bed-out>                             per-base correspondence rows
  exons_<bed-out>                       rows falling inside exons
  supertscoords_exons_<bed-out>         rows in assembly coordinates
  wdepth_supertscoords_exons_<bed-out>  assembly rows with depth
  callable_sites                        covered-position count
  exonsonly.recode.vcf + bridged BED    restricted calls (single-copy)
  exons_<vcf stem>.bed / .vcf           restricted calls (--polyploid)
  wGenomePosDepth_<bed>                 restricted calls with depth
  pipeline_metrics.txt                  one-row run metrics

Single-copy samples are restricted with vcftools directly against the
assembly-coordinate exon positions. With --polyploid the calls detour
through the interval domain (vcf2bed, intersect, bed2vcf) instead, because
positional BED matching is the only restriction that treats multi-allelic
records soundly.

Both external tools are probed with --version before any artifact is
written; vcftools is only required for single-copy runs.

EXAMPLES:

  # Single-copy sample
  stlift pipeline -i aligned.bed -f assembly.fa -e merged_sorted_exons.bed \
    -d depth.txt -v calls.vcf -o perbase.bed --output-dir out

  # Polyploid sample: restrict calls through the interval domain
  stlift pipeline -i aligned.bed -f assembly.fa -e merged_sorted_exons.bed \
    -d depth.txt -v calls.vcf -o perbase.bed --output-dir out --polyploid

  # Tolerate malformed records and noisy tools
  stlift pipeline -i aligned.bed -f assembly.fa -e merged_sorted_exons.bed \
    -d depth.txt -v calls.vcf -o perbase.bed --output-dir out \
    --on-error skip-and-report --on-stderr warn
"#
)]
pub struct Pipeline {
    /// Alignment BED file with a CIGAR column
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Assembly FASTA the alignments were produced from
    #[arg(short = 'f', long = "assembly")]
    pub assembly: PathBuf,

    /// Genomic exon BED, sorted and merged
    #[arg(short = 'e', long = "exons")]
    pub exons: PathBuf,

    /// Per-base depth track over the assembly
    #[arg(short = 'd', long = "depth")]
    pub depth: PathBuf,

    /// Variant calls over the assembly
    #[arg(short = 'v', long = "vcf")]
    pub vcf: PathBuf,

    /// File name for the per-base correspondence BED; stage prefixes are
    /// prepended to it for the derived artifacts
    #[arg(short = 'o', long = "bed-out")]
    pub bed_out: String,

    /// Directory receiving every artifact
    #[arg(long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// Restrict calls through the interval domain instead of vcftools
    #[arg(short = 'p', long = "polyploid")]
    pub polyploid: bool,

    /// Which expanded bases produce correspondence rows
    #[arg(long = "emit", value_enum, default_value = "query-consuming")]
    pub emit: EmissionPolicyArg,

    /// Record-level error handling
    #[command(flatten)]
    pub errors: ErrorHandlingOptions,

    /// External tool configuration
    #[command(flatten)]
    pub engines: EngineOptions,
}

impl Command for Pipeline {
    fn execute(&self) -> Result<()> {
        validate_files_exist(&[
            (&self.input, "Alignment BED"),
            (&self.assembly, "Assembly FASTA"),
            (&self.exons, "Exon BED"),
            (&self.depth, "Depth track"),
            (&self.vcf, "VCF"),
        ])?;

        let ploidy = if self.polyploid { PloidyMode::Polyploid } else { PloidyMode::SingleCopy };
        let config = PipelineConfig {
            alignment_bed: self.input.clone(),
            assembly_fasta: self.assembly.clone(),
            exon_bed: self.exons.clone(),
            depth_track: self.depth.clone(),
            vcf: self.vcf.clone(),
            output_dir: self.output_dir.clone(),
            bed_out: self.bed_out.clone(),
            ploidy,
            on_error: self.errors.policy(),
            on_stderr: self.engines.stderr_policy(),
            emission: self.emit.into(),
        };
        config.validate()?;

        info!("Starting Pipeline");
        info!("Input: {}", self.input.display());
        info!("Assembly: {}", self.assembly.display());
        info!("Exons: {}", self.exons.display());
        info!("Depth: {}", self.depth.display());
        info!("VCF: {}", self.vcf.display());
        info!("Output directory: {}", self.output_dir.display());
        info!("Per-base BED name: {}", self.bed_out);
        info!("Ploidy: {ploidy:?}");
        info!("Emission policy: {:?}", self.emit);

        let pipeline = stlift_lib::pipeline::Pipeline::new(
            config.clone(),
            self.engines.interval_engine(),
            self.engines.variant_engine(),
        );
        let summary = pipeline.run()?;

        info!("=== Summary ===");
        info!("Contigs indexed: {}", summary.contigs_indexed);
        info!("Depth rows: {}", summary.depth_rows);
        info!("Alignment records: {}", summary.alignment_records);
        if summary.depth_skipped + summary.alignment_skipped > 0 {
            info!(
                "Skipped records: {} depth, {} alignment",
                summary.depth_skipped, summary.alignment_skipped
            );
        }
        info!("Correspondence rows: {}", summary.correspondences);
        info!("Exonic positions: {}", summary.exonic_positions);
        info!("Callable sites: {}", summary.callable_sites);
        info!("Exonic variants: {}", summary.exonic_variants);
        info!("Depth-annotated positions: {}", config.depth_annotated_bed().display());
        info!("Metrics: {}", config.metrics_path().display());

        Ok(())
    }
}
