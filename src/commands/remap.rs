//! Reanchor exon-restricted correspondence rows into assembly coordinates.

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use stlift_lib::logging::{format_count, StageTimer};
use stlift_lib::remap::remap_file;
use stlift_lib::validation::validate_file_exists;

use crate::commands::command::Command;
use crate::commands::common::{ErrorHandlingOptions, RemapModeArg};

/// Reanchor exon-restricted correspondence rows into assembly coordinates.
#[derive(Debug, Parser)]
#[command(
    name = "remap",
    about = "\x1b[38;5;72m[CONVERT]\x1b[0m        \x1b[36mReanchor correspondence rows into assembly coordinates\x1b[0m",
    long_about = r#"
Reanchor exon-restricted correspondence rows into assembly coordinates.

The input rows come from intersecting per-base correspondence rows against
an exon BED (bedtools intersect -wa): six correspondence columns, with the
1-based assembly position in the sixth. Each row is rewritten with the
assembly contig as the interval:

  extended (default)   contig  pos-1  pos  target  start  end  strand
  minimal              contig  pos-1  pos

The extended form feeds depth joins in assembly space while still carrying
the genomic anchor; the minimal form serves plain counting.

EXAMPLES:

  # Extended rows for a downstream depth join
  stlift remap -i exons_perbase.bed -o supertscoords_exons_perbase.bed

  # Minimal 3-column rows
  stlift remap -i exons_perbase.bed -o positions.bed --mode minimal
"#
)]
pub struct Remap {
    /// Input exon-restricted correspondence BED
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output assembly-coordinate BED
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Output shape
    #[arg(long = "mode", value_enum, default_value = "extended")]
    pub mode: RemapModeArg,

    /// Record-level error handling
    #[command(flatten)]
    pub errors: ErrorHandlingOptions,
}

impl Command for Remap {
    fn execute(&self) -> Result<()> {
        validate_file_exists(&self.input, "Correspondence BED")?;

        info!("Starting Remap");
        info!("Input: {}", self.input.display());
        info!("Output: {}", self.output.display());
        info!("Mode: {:?}", self.mode);

        let timer = StageTimer::new("Remapping to assembly coordinates");
        let stats = remap_file(&self.input, &self.output, self.mode.into(), self.errors.policy())?;
        timer.log_completion(stats.rows);

        info!("=== Summary ===");
        info!("Rows remapped: {}", format_count(stats.rows));
        if stats.skipped > 0 {
            info!("Rows skipped: {}", format_count(stats.skipped));
        }
        info!("Output: {}", self.output.display());

        Ok(())
    }
}
