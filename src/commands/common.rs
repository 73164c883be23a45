//! Common CLI options shared across commands.
//!
//! This module provides shared argument structures that can be composed into
//! command structs using `#[command(flatten)]`, plus the CLI-side mirrors of
//! the library policy enums.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, ValueEnum};

use stlift_lib::cigar::EmissionPolicy;
use stlift_lib::engines::{BedtoolsEngine, StderrPolicy, VcftoolsEngine};
use stlift_lib::errors::ErrorPolicy;
use stlift_lib::remap::RemapMode;

/// What to do when a record fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ErrorPolicyArg {
    /// Stop at the first bad record
    #[default]
    FailFast,
    /// Log the bad record, count it, and continue
    SkipAndReport,
}

impl From<ErrorPolicyArg> for ErrorPolicy {
    fn from(arg: ErrorPolicyArg) -> Self {
        match arg {
            ErrorPolicyArg::FailFast => ErrorPolicy::FailFast,
            ErrorPolicyArg::SkipAndReport => ErrorPolicy::SkipAndReport,
        }
    }
}

/// Which expanded alignment bases produce output rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EmissionPolicyArg {
    /// Every query-consuming base (M, I, S, =, X)
    #[default]
    QueryConsuming,
    /// Aligned bases only (M, =, X)
    AlignedOnly,
}

impl From<EmissionPolicyArg> for EmissionPolicy {
    fn from(arg: EmissionPolicyArg) -> Self {
        match arg {
            EmissionPolicyArg::QueryConsuming => EmissionPolicy::QueryConsuming,
            EmissionPolicyArg::AlignedOnly => EmissionPolicy::AlignedOnly,
        }
    }
}

/// How to treat diagnostics an external tool writes to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StderrPolicyArg {
    /// Treat any stderr output as a failure
    #[default]
    Abort,
    /// Log the diagnostics and continue
    Warn,
}

impl From<StderrPolicyArg> for StderrPolicy {
    fn from(arg: StderrPolicyArg) -> Self {
        match arg {
            StderrPolicyArg::Abort => StderrPolicy::Abort,
            StderrPolicyArg::Warn => StderrPolicy::Warn,
        }
    }
}

/// Output shape for remapped rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RemapModeArg {
    /// 3 columns: assembly contig, start, end
    Minimal,
    /// 7 columns: the minimal 3 plus the genomic target, start, end, strand
    #[default]
    Extended,
}

impl From<RemapModeArg> for RemapMode {
    fn from(arg: RemapModeArg) -> Self {
        match arg {
            RemapModeArg::Minimal => RemapMode::Minimal,
            RemapModeArg::Extended => RemapMode::Extended,
        }
    }
}

/// Options for record-level error handling in parse stages.
#[derive(Debug, Clone, Default, Args)]
pub struct ErrorHandlingOptions {
    /// What to do when a record fails to parse
    #[arg(long = "on-error", value_enum, default_value = "fail-fast")]
    pub on_error: ErrorPolicyArg,
}

impl ErrorHandlingOptions {
    /// The configured policy as the library enum.
    #[must_use]
    pub fn policy(&self) -> ErrorPolicy {
        self.on_error.into()
    }
}

/// Options configuring the external interval and variant engines.
#[derive(Debug, Clone, Args)]
pub struct EngineOptions {
    /// Path to the bedtools executable
    #[arg(long = "bedtools", default_value = "bedtools")]
    pub bedtools: PathBuf,

    /// Path to the vcftools executable
    #[arg(long = "vcftools", default_value = "vcftools")]
    pub vcftools: PathBuf,

    /// Kill an external tool invocation after this many seconds
    #[arg(long = "tool-timeout")]
    pub tool_timeout: Option<u64>,

    /// How to treat diagnostics an external tool writes to stderr
    #[arg(long = "on-stderr", value_enum, default_value = "abort")]
    pub on_stderr: StderrPolicyArg,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            bedtools: PathBuf::from("bedtools"),
            vcftools: PathBuf::from("vcftools"),
            tool_timeout: None,
            on_stderr: StderrPolicyArg::Abort,
        }
    }
}

impl EngineOptions {
    fn timeout(&self) -> Option<Duration> {
        self.tool_timeout.map(Duration::from_secs)
    }

    /// Builds the interval engine with the configured executable and timeout.
    #[must_use]
    pub fn interval_engine(&self) -> BedtoolsEngine {
        BedtoolsEngine::with_executable(&self.bedtools).timeout(self.timeout())
    }

    /// Builds the variant engine with the configured executable and timeout.
    #[must_use]
    pub fn variant_engine(&self) -> VcftoolsEngine {
        VcftoolsEngine::with_executable(&self.vcftools).timeout(self.timeout())
    }

    /// The configured stderr policy as the library enum.
    #[must_use]
    pub fn stderr_policy(&self) -> StderrPolicy {
        self.on_stderr.into()
    }
}
