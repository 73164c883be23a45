//! Bridge variant calls between VCF and BED representations.
//!
//! `vcf2bed` splits a VCF into a BED of single-base intervals plus a
//! verbatim header sidecar; `bed2vcf` reassembles a VCF from those two
//! pieces. The split lets interval tools restrict calls positionally, and
//! the sidecar makes the round trip lossless for the rows that survive.

use anyhow::Result;
use clap::Parser;
use log::info;
use std::ffi::OsString;
use std::path::PathBuf;

use stlift_lib::logging::{format_count, StageTimer};
use stlift_lib::validation::{validate_file_exists, validate_files_exist};
use stlift_lib::vcf_bridge::{bed_to_vcf, vcf_to_bed};

use crate::commands::command::Command;
use crate::commands::common::ErrorHandlingOptions;

/// Convert variant calls to single-base BED intervals.
#[derive(Debug, Parser)]
#[command(
    name = "vcf2bed",
    about = "\x1b[38;5;72m[CONVERT]\x1b[0m        \x1b[36mConvert variant calls to single-base BED intervals\x1b[0m",
    long_about = r#"
Convert variant calls to single-base BED intervals.

Header lines (leading '#') are copied verbatim into a sidecar file; each
data line becomes a half-open interval whose end is the 1-based variant
position, with every remaining VCF column carried as trailing fields:

  contig  position-1  position  id  ref  alt  ...

Together with the sidecar, `stlift bed2vcf` restores a valid VCF for
whichever rows survive interval operations in between.

EXAMPLES:

  # Split calls.vcf into calls.bed + calls.vcf.header
  stlift vcf2bed -i calls.vcf -o calls.bed

  # Explicit sidecar location
  stlift vcf2bed -i calls.vcf -o calls.bed --header calls.header
"#
)]
pub struct Vcf2Bed {
    /// Input VCF
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output BED of single-base intervals
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Header sidecar file [default: <input>.header]
    #[arg(long = "header")]
    pub header: Option<PathBuf>,

    /// Record-level error handling
    #[command(flatten)]
    pub errors: ErrorHandlingOptions,
}

impl Vcf2Bed {
    fn header_path(&self) -> PathBuf {
        self.header.clone().unwrap_or_else(|| {
            let mut name = OsString::from(self.input.as_os_str());
            name.push(".header");
            PathBuf::from(name)
        })
    }
}

impl Command for Vcf2Bed {
    fn execute(&self) -> Result<()> {
        validate_file_exists(&self.input, "VCF")?;
        let header = self.header_path();

        info!("Starting Vcf2Bed");
        info!("Input: {}", self.input.display());
        info!("Output: {}", self.output.display());
        info!("Header sidecar: {}", header.display());

        let timer = StageTimer::new("Bridging variants to intervals");
        let stats = vcf_to_bed(&self.input, &self.output, &header, self.errors.policy())?;
        timer.log_completion(stats.data_rows);

        info!("=== Summary ===");
        info!("Header lines: {}", format_count(stats.header_rows));
        info!("Data rows: {}", format_count(stats.data_rows));
        if stats.skipped > 0 {
            info!("Rows skipped: {}", format_count(stats.skipped));
        }
        info!("Output: {}", self.output.display());

        Ok(())
    }
}

/// Reassemble a VCF from bridged intervals and a header sidecar.
#[derive(Debug, Parser)]
#[command(
    name = "bed2vcf",
    about = "\x1b[38;5;72m[CONVERT]\x1b[0m        \x1b[36mReassemble a VCF from bridged intervals and a header sidecar\x1b[0m",
    long_about = r#"
Reassemble a VCF from bridged intervals and a header sidecar.

The inverse of `stlift vcf2bed`: the sidecar is emitted verbatim, then each
interval row becomes a data line with the interval's end restored as the
1-based position and the trailing fields appended unchanged.

EXAMPLES:

  # Restore the calls that survived an intersection
  stlift bed2vcf -i exons_calls.bed --header calls.vcf.header -o exons_calls.vcf
"#
)]
pub struct Bed2Vcf {
    /// Input BED of bridged intervals
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Header sidecar written by vcf2bed
    #[arg(long = "header")]
    pub header: PathBuf,

    /// Output VCF
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Record-level error handling
    #[command(flatten)]
    pub errors: ErrorHandlingOptions,
}

impl Command for Bed2Vcf {
    fn execute(&self) -> Result<()> {
        validate_files_exist(&[(&self.input, "Bridged BED"), (&self.header, "Header sidecar")])?;

        info!("Starting Bed2Vcf");
        info!("Input: {}", self.input.display());
        info!("Header sidecar: {}", self.header.display());
        info!("Output: {}", self.output.display());

        let timer = StageTimer::new("Bridging intervals to variants");
        let stats = bed_to_vcf(&self.input, &self.header, &self.output, self.errors.policy())?;
        timer.log_completion(stats.data_rows);

        info!("=== Summary ===");
        info!("Header lines: {}", format_count(stats.header_rows));
        info!("Data rows: {}", format_count(stats.data_rows));
        if stats.skipped > 0 {
            info!("Rows skipped: {}", format_count(stats.skipped));
        }
        info!("Output: {}", self.output.display());

        Ok(())
    }
}
