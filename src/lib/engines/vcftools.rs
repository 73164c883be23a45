//! vcftools-backed variant engine.
//!
//! Restriction runs `vcftools --vcf <calls> --recode --bed <intervals>
//! --out <prefix>`, which writes the surviving calls to
//! `<prefix>.recode.vcf`. The returned path accounts for that suffix so
//! callers never have to know the tool's naming convention.

use crate::engines::{probe_tool, run_tool, EngineRun, VariantEngine};
use crate::errors::Result;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// [`VariantEngine`] implementation that shells out to vcftools.
#[derive(Debug, Clone)]
pub struct VcftoolsEngine {
    executable: PathBuf,
    timeout: Option<Duration>,
}

impl VcftoolsEngine {
    /// Creates an engine invoking `vcftools` from the search path.
    #[must_use]
    pub fn new() -> Self {
        Self::with_executable("vcftools")
    }

    /// Creates an engine invoking the given executable.
    #[must_use]
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self { executable: executable.into(), timeout: None }
    }

    /// Sets an upper bound on the wall time of each invocation.
    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The path vcftools derives from an `--out` prefix.
    fn recoded_path(out_prefix: &Path) -> PathBuf {
        let mut name = out_prefix.as_os_str().to_os_string();
        name.push(".recode.vcf");
        PathBuf::from(name)
    }
}

impl Default for VcftoolsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl VariantEngine for VcftoolsEngine {
    fn name(&self) -> &str {
        "vcftools"
    }

    fn probe(&self) -> Result<()> {
        probe_tool(self.name(), &self.executable)
    }

    fn restrict_by_intervals(
        &self,
        vcf: &Path,
        bed: &Path,
        out_prefix: &Path,
    ) -> Result<(PathBuf, EngineRun)> {
        let mut cmd = Command::new(&self.executable);
        cmd.arg("--vcf")
            .arg(vcf)
            .arg("--recode")
            .arg("--bed")
            .arg(bed)
            .arg("--out")
            .arg(out_prefix);
        let run = run_tool(self.name(), "restrict", &mut cmd, None, self.timeout)?;
        Ok((Self::recoded_path(out_prefix), run))
    }
}
