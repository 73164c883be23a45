//! Annotate a position BED with depth values.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

use stlift_lib::engines::IntervalEngine;
use stlift_lib::join::{depth_join, JoinMode};
use stlift_lib::logging::{format_count, format_percent};
use stlift_lib::validation::validate_files_exist;

use crate::commands::command::Command;
use crate::commands::common::EngineOptions;

/// How the depth track is consumed.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum JoinModeArg {
    /// Annotate every position with its depth value (left outer join)
    #[default]
    PerSite,
    /// Keep only positions the depth track covers (inner intersect)
    Count,
}

impl From<JoinModeArg> for JoinMode {
    fn from(arg: JoinModeArg) -> Self {
        match arg {
            JoinModeArg::PerSite => JoinMode::PerSite,
            JoinModeArg::Count => JoinMode::Count,
        }
    }
}

/// Annotate a position BED with depth values.
#[derive(Debug, Parser)]
#[command(
    name = "join",
    about = "\x1b[38;5;151m[INTERVALS]\x1b[0m      \x1b[36mAnnotate a position BED with depth values\x1b[0m",
    long_about = r#"
Annotate a position BED with depth values.

The depth side must be a 4-column BED as written by `stlift depth`. In
per-site mode every input position appears in the output exactly once per
overlapping depth interval, with the depth value appended as a final
column and '.' where no depth interval overlaps. In count mode the output
keeps only the covered positions, and the covered-position count equals
the number of non-'.' rows a per-site run would produce.

EXAMPLES:

  # Per-position depth for remapped exon positions
  stlift join -a supertscoords_exons_perbase.bed -b reformat_depth.txt \
    -o wdepth_supertscoords_exons_perbase.bed

  # Just the covered positions
  stlift join -a positions.bed -b reformat_depth.txt -o covered_positions.bed --mode count
"#
)]
pub struct Join {
    /// Position BED to annotate
    #[arg(short = 'a', long = "positions")]
    pub positions: PathBuf,

    /// Normalized 4-column depth BED
    #[arg(short = 'b', long = "depth")]
    pub depth: PathBuf,

    /// Output file
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// How the depth track is consumed
    #[arg(long = "mode", value_enum, default_value = "per-site")]
    pub mode: JoinModeArg,

    /// External tool configuration
    #[command(flatten)]
    pub engines: EngineOptions,
}

impl Command for Join {
    #[allow(clippy::cast_precision_loss)]
    fn execute(&self) -> Result<()> {
        validate_files_exist(&[(&self.positions, "Position BED"), (&self.depth, "Depth BED")])?;

        let engine = self.engines.interval_engine();
        engine.probe()?;

        info!("Starting Join");
        info!("Positions: {}", self.positions.display());
        info!("Depth: {}", self.depth.display());
        info!("Output: {}", self.output.display());
        info!("Mode: {:?}", self.mode);

        let outcome = depth_join(
            &engine,
            &self.positions,
            &self.depth,
            self.mode.into(),
            &self.output,
            self.engines.stderr_policy(),
        )?;

        info!("=== Summary ===");
        info!("Rows written: {}", format_count(outcome.rows));
        info!("Covered positions: {}", format_count(outcome.matched));
        if outcome.rows > 0 {
            let coverage = outcome.matched as f64 / outcome.rows as f64;
            info!("Coverage: {}", format_percent(coverage, 2));
        }
        info!("Output: {}", outcome.output.display());

        Ok(())
    }
}
