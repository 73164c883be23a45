//! Sort and merge an exon BED through the interval engine.

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};

use stlift_lib::engines::{route_stderr, IntervalEngine};
use stlift_lib::validation::{ensure_output_dir, validate_file_exists};

use crate::commands::command::Command;
use crate::commands::common::EngineOptions;

/// Sort and merge an exon BED through the interval engine.
#[derive(Debug, Parser)]
#[command(
    name = "prepare",
    about = "\x1b[38;5;151m[INTERVALS]\x1b[0m      \x1b[36mSort and merge an exon BED for downstream intersections\x1b[0m",
    long_about = r#"
Sort and merge an exon BED for downstream intersections.

Interval intersections expect their B side sorted and free of overlapping
entries. This runs `bedtools sort` then `bedtools merge` over the input,
writing both intermediates into the output directory:

  sorted_<name>         the sorted exons
  merged_sorted_<name>  the sorted exons with overlaps collapsed

EXAMPLES:

  # Prepare an annotation export for use with `stlift pipeline -e`
  stlift prepare -i exons.bed --output-dir out

  # Point at a specific bedtools build
  stlift prepare -i exons.bed --output-dir out --bedtools /opt/bedtools2/bin/bedtools
"#
)]
pub struct Prepare {
    /// Input exon BED
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Directory receiving the sorted and merged files
    #[arg(long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// External tool configuration
    #[command(flatten)]
    pub engines: EngineOptions,
}

impl Prepare {
    fn file_name(path: &Path) -> String {
        path.file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }
}

impl Command for Prepare {
    fn execute(&self) -> Result<()> {
        validate_file_exists(&self.input, "Exon BED")?;

        let engine = self.engines.interval_engine();
        engine.probe()?;
        ensure_output_dir(&self.output_dir)?;

        let name = Self::file_name(&self.input);
        let sorted = self.output_dir.join(format!("sorted_{name}"));
        let merged = self.output_dir.join(format!("merged_sorted_{name}"));

        info!("Starting Prepare");
        info!("Input: {}", self.input.display());
        info!("Output directory: {}", self.output_dir.display());

        info!("Sorting intervals ...");
        let run = engine.sort(&self.input, &sorted)?;
        route_stderr(self.engines.stderr_policy(), engine.name(), "sort", &run)?;

        info!("Merging overlapping intervals ...");
        let run = engine.merge(&sorted, &merged)?;
        route_stderr(self.engines.stderr_policy(), engine.name(), "merge", &run)?;

        info!("=== Summary ===");
        info!("Sorted: {}", sorted.display());
        info!("Merged: {}", merged.display());

        Ok(())
    }
}
