//! Expand spliced alignments into per-base correspondence rows.
//!
//! Each alignment record maps one assembly contig onto the genome with a
//! CIGAR string. Expansion walks the CIGAR and writes one BED row per
//! query-consuming base, pairing a genomic position with the 1-based
//! assembly position that aligns there. Deletions and introns advance the
//! genomic cursor without emitting rows, so spliced alignments come out
//! with the gaps the CIGAR describes.

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use stlift_lib::cigar::expand_file;
use stlift_lib::contig::ContigLengths;
use stlift_lib::logging::{format_count, StageTimer};
use stlift_lib::validation::validate_files_exist;

use crate::commands::command::Command;
use crate::commands::common::{EmissionPolicyArg, ErrorHandlingOptions};

/// Expand spliced alignments into per-base correspondence rows.
#[derive(Debug, Parser)]
#[command(
    name = "expand",
    about = "\x1b[38;5;72m[CONVERT]\x1b[0m        \x1b[36mExpand spliced alignments into per-base correspondence rows\x1b[0m",
    long_about = r#"
Expand spliced alignments into per-base correspondence rows.

The input is a 7-column BED produced by aligning an assembly to the genome:
target, start, end, assembly contig, mapping quality, strand, CIGAR. For every
query-consuming CIGAR base one output row is written:

  target  pos  pos+1  strand  contig  contig-position

Contig positions are 1-based and counted from the contig's 3' end for
reverse-strand alignments, which requires the contig length from the
assembly FASTA. Deletions (D) and introns (N) advance the genomic position
without producing rows.

EXAMPLES:

  # Per-base rows for every query-consuming base
  stlift expand -i aligned.bed -f assembly.fa -o perbase.bed

  # Restrict to aligned bases (drop soft clips and insertions)
  stlift expand -i aligned.bed -f assembly.fa -o perbase.bed --emit aligned-only

  # Skip malformed records instead of failing
  stlift expand -i aligned.bed -f assembly.fa -o perbase.bed --on-error skip-and-report
"#
)]
pub struct Expand {
    /// Alignment BED file with a CIGAR column
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Assembly FASTA the alignments were produced from
    #[arg(short = 'f', long = "assembly")]
    pub assembly: PathBuf,

    /// Output per-base correspondence BED
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Which expanded bases produce output rows
    #[arg(long = "emit", value_enum, default_value = "query-consuming")]
    pub emit: EmissionPolicyArg,

    /// Record-level error handling
    #[command(flatten)]
    pub errors: ErrorHandlingOptions,
}

impl Command for Expand {
    fn execute(&self) -> Result<()> {
        validate_files_exist(&[
            (&self.input, "Alignment BED"),
            (&self.assembly, "Assembly FASTA"),
        ])?;

        info!("Starting Expand");
        info!("Input: {}", self.input.display());
        info!("Assembly: {}", self.assembly.display());
        info!("Output: {}", self.output.display());
        info!("Emission policy: {:?}", self.emit);

        let timer = StageTimer::new("Indexing contig lengths");
        let lengths = ContigLengths::from_fasta(&self.assembly)?;
        timer.log_completion(lengths.len() as u64);

        let timer = StageTimer::new("Expanding alignment records");
        let stats = expand_file(
            &self.input,
            &lengths,
            &self.output,
            self.emit.into(),
            self.errors.policy(),
        )?;
        timer.log_completion(stats.emitted);

        info!("=== Summary ===");
        info!("Alignment records: {}", format_count(stats.records));
        if stats.skipped > 0 {
            info!("Records skipped: {}", format_count(stats.skipped));
        }
        info!("Correspondence rows: {}", format_count(stats.emitted));
        info!("Output: {}", self.output.display());

        Ok(())
    }
}
