//! Normalize a per-base depth track into BED intervals.

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use stlift_lib::depth::normalize_file;
use stlift_lib::logging::{format_count, StageTimer};
use stlift_lib::validation::validate_file_exists;

use crate::commands::command::Command;
use crate::commands::common::ErrorHandlingOptions;

/// Normalize a per-base depth track into BED intervals.
#[derive(Debug, Parser)]
#[command(
    name = "depth",
    about = "\x1b[38;5;72m[CONVERT]\x1b[0m        \x1b[36mNormalize a per-base depth track into BED intervals\x1b[0m",
    long_about = r#"
Normalize a per-base depth track into BED intervals.

Depth callers report one row per covered base with at least five columns,
the fourth being the 1-based position and the fifth the depth value. Each
row is rewritten as a half-open single-base interval that interval tools
can join against:

  contig  position-1  position  depth

EXAMPLES:

  # Rewrite a samtools-style depth track
  stlift depth -i depth.txt -o reformat_depth.txt

  # Skip malformed rows instead of failing
  stlift depth -i depth.txt -o reformat_depth.txt --on-error skip-and-report
"#
)]
pub struct Depth {
    /// Input per-base depth track
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output normalized BED
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Record-level error handling
    #[command(flatten)]
    pub errors: ErrorHandlingOptions,
}

impl Command for Depth {
    fn execute(&self) -> Result<()> {
        validate_file_exists(&self.input, "Depth track")?;

        info!("Starting Depth");
        info!("Input: {}", self.input.display());
        info!("Output: {}", self.output.display());

        let timer = StageTimer::new("Normalizing depth track");
        let stats = normalize_file(&self.input, &self.output, self.errors.policy())?;
        timer.log_completion(stats.rows);

        info!("=== Summary ===");
        info!("Rows normalized: {}", format_count(stats.rows));
        if stats.skipped > 0 {
            info!("Rows skipped: {}", format_count(stats.skipped));
        }
        info!("Output: {}", self.output.display());

        Ok(())
    }
}
