//! End-to-end conversion pipeline.
//!
//! Runs the fixed stage graph that turns an assembly-to-genome alignment,
//! an exon annotation, a depth track, and a set of variant calls into
//! genome-anchored per-base, depth, and genotype artifacts. Every stage
//! writes its output into one directory under a deterministic name built by
//! prefixing the previous stage's file name, so a finished directory reads
//! as a record of the run.
//!
//! The stage graph is:
//!
//! 1. normalize the depth track (`reformat_<depth>`)
//! 2. index contig lengths from the assembly FASTA
//! 3. expand alignments to per-base rows (`<bed-out>`)
//! 4. restrict rows to exons (`exons_<bed-out>`)
//! 5. remap rows into assembly coordinates (`supertscoords_exons_<bed-out>`)
//! 6. annotate with depth (`wdepth_supertscoords_exons_<bed-out>`) and write
//!    the covered-position count (`callable_sites`)
//! 7. restrict the variant calls to exonic assembly positions, directly for
//!    a single-copy sample or through the interval domain for a polyploid
//!    one
//! 8. annotate the restricted genotypes with depth (`wGenomePosDepth_<bed>`)
//! 9. write one row of run metrics (`pipeline_metrics.txt`)
//!
//! Both engines are probed before stage 1 so a missing tool fails the run
//! before any artifact is written.

use crate::cigar::{self, EmissionPolicy};
use crate::contig::ContigLengths;
use crate::depth;
use crate::engines::{route_stderr, IntervalEngine, StderrPolicy, VariantEngine};
use crate::errors::{ErrorPolicy, Result, StliftError};
use crate::join::{depth_join, JoinMode};
use crate::logging::StageTimer;
use crate::remap::{self, RemapMode};
use crate::validation::ensure_output_dir;
use crate::vcf_bridge;
use anyhow::Context;
use fgoxide::io::{DelimFile, Io};
use log::info;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File holding the covered-position count.
const CALLABLE_SITES_FILE: &str = "callable_sites";

/// Prefix handed to the variant engine for direct restriction.
const RESTRICTION_PREFIX: &str = "exonsonly";

/// File holding the end-of-run metrics row.
pub const METRICS_FILE_NAME: &str = "pipeline_metrics.txt";

/// Whether the sample's copy number lets the variant engine restrict the
/// VCF directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PloidyMode {
    /// Single-copy sample; the variant engine filters the VCF itself
    #[default]
    SingleCopy,
    /// Multi-copy sample; restriction detours through the interval domain
    Polyploid,
}

/// Inputs, output naming, and policies for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Alignment BED with a CIGAR column, assembly mapped to the genome
    pub alignment_bed: PathBuf,
    /// Assembly FASTA the alignments were produced from
    pub assembly_fasta: PathBuf,
    /// Genomic exon BED, expected sorted and merged
    pub exon_bed: PathBuf,
    /// Raw per-base depth track over the assembly
    pub depth_track: PathBuf,
    /// Variant calls over the assembly
    pub vcf: PathBuf,
    /// Directory receiving every artifact
    pub output_dir: PathBuf,
    /// File name of the per-base correspondence BED; later artifact names
    /// are derived from it by prefixing
    pub bed_out: String,
    /// Copy-number handling for the variant restriction stage
    pub ploidy: PloidyMode,
    /// Record-level error handling for the parse stages
    pub on_error: ErrorPolicy,
    /// Diagnostics routing for engine invocations
    pub on_stderr: StderrPolicy,
    /// Which expanded bases produce correspondence rows
    pub emission: EmissionPolicy,
}

impl PipelineConfig {
    /// Rejects output names the prefixing scheme cannot work with.
    ///
    /// # Errors
    /// Returns [`StliftError::InvalidParameter`] when `bed_out` is empty or
    /// carries a path separator.
    pub fn validate(&self) -> Result<()> {
        if self.bed_out.is_empty() || self.bed_out.contains(std::path::MAIN_SEPARATOR) {
            return Err(StliftError::InvalidParameter {
                parameter: "bed-out".to_string(),
                reason: format!(
                    "must be a bare file name, got '{}'; stage prefixes are prepended to it",
                    self.bed_out
                ),
            });
        }
        Ok(())
    }

    fn artifact(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }

    fn file_stem(path: &Path) -> String {
        path.file_stem()
            .map_or_else(|| Self::file_name(path), |n| n.to_string_lossy().into_owned())
    }

    /// `reformat_<depth>`: the normalized depth track.
    #[must_use]
    pub fn normalized_depth(&self) -> PathBuf {
        self.artifact(&format!("reformat_{}", Self::file_name(&self.depth_track)))
    }

    /// `<bed-out>`: the per-base correspondence BED.
    #[must_use]
    pub fn correspondence_bed(&self) -> PathBuf {
        self.artifact(&self.bed_out)
    }

    /// `exons_<bed-out>`: correspondence rows falling inside exons.
    #[must_use]
    pub fn exonic_bed(&self) -> PathBuf {
        self.artifact(&format!("exons_{}", self.bed_out))
    }

    /// `supertscoords_exons_<bed-out>`: exonic rows in assembly coordinates.
    #[must_use]
    pub fn supertscoords_bed(&self) -> PathBuf {
        self.artifact(&format!("supertscoords_exons_{}", self.bed_out))
    }

    /// `wdepth_supertscoords_exons_<bed-out>`: assembly rows with depth.
    #[must_use]
    pub fn depth_annotated_bed(&self) -> PathBuf {
        self.artifact(&format!("wdepth_supertscoords_exons_{}", self.bed_out))
    }

    /// `callable_sites`: single-line covered-position count.
    #[must_use]
    pub fn callable_sites_path(&self) -> PathBuf {
        self.artifact(CALLABLE_SITES_FILE)
    }

    /// `exonsonly`: prefix the variant engine derives its output from.
    #[must_use]
    pub fn restriction_prefix(&self) -> PathBuf {
        self.artifact(RESTRICTION_PREFIX)
    }

    /// `<stem>.bed`: the interval side of a bridged VCF.
    #[must_use]
    pub fn bridged_bed(&self, vcf: &Path) -> PathBuf {
        self.artifact(&format!("{}.bed", Self::file_stem(vcf)))
    }

    /// `<name>.header`: the verbatim header sidecar of a bridged VCF.
    #[must_use]
    pub fn bridged_header(&self, vcf: &Path) -> PathBuf {
        self.artifact(&format!("{}.header", Self::file_name(vcf)))
    }

    /// `exons_<vcf stem>.bed`: bridged calls restricted to exonic positions.
    #[must_use]
    pub fn exonic_variant_bed(&self) -> PathBuf {
        self.artifact(&format!("exons_{}.bed", Self::file_stem(&self.vcf)))
    }

    /// `exons_<vcf stem>.vcf`: the restricted calls reassembled as a VCF.
    #[must_use]
    pub fn exonic_variant_vcf(&self) -> PathBuf {
        self.artifact(&format!("exons_{}.vcf", Self::file_stem(&self.vcf)))
    }

    /// `wGenomePosDepth_<bed>`: restricted genotypes with depth appended.
    #[must_use]
    pub fn genotype_depth_bed(&self, genotype_bed: &Path) -> PathBuf {
        self.artifact(&format!("wGenomePosDepth_{}", Self::file_name(genotype_bed)))
    }

    /// `pipeline_metrics.txt`: the end-of-run metrics row.
    #[must_use]
    pub fn metrics_path(&self) -> PathBuf {
        self.artifact(METRICS_FILE_NAME)
    }
}

/// One row of end-of-run metrics, also written as `pipeline_metrics.txt`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Assembly contigs indexed from the FASTA
    pub contigs_indexed: u64,
    /// Depth rows normalized
    pub depth_rows: u64,
    /// Depth rows skipped as malformed
    pub depth_skipped: u64,
    /// Alignment records expanded
    pub alignment_records: u64,
    /// Alignment records skipped as malformed
    pub alignment_skipped: u64,
    /// Per-base correspondence rows emitted
    pub correspondences: u64,
    /// Correspondence rows that fell inside exons
    pub exonic_positions: u64,
    /// Exonic assembly positions covered by the depth track
    pub callable_sites: u64,
    /// Variant calls that survived restriction
    pub exonic_variants: u64,
}

/// The fixed conversion pipeline, generic over its two engines.
pub struct Pipeline<I, V> {
    config: PipelineConfig,
    intervals: I,
    variants: V,
}

impl<I: IntervalEngine, V: VariantEngine> Pipeline<I, V> {
    /// Binds a configuration to the engines that will execute it.
    pub fn new(config: PipelineConfig, intervals: I, variants: V) -> Self {
        Self { config, intervals, variants }
    }

    /// Runs every stage, returning the collected metrics.
    ///
    /// # Errors
    /// Returns an error when an engine probe fails, a stage fails, or an
    /// engine's diagnostics are rejected by the stderr policy. Artifacts
    /// written before the failing stage are left in place.
    pub fn run(&self) -> anyhow::Result<PipelineSummary> {
        let cfg = &self.config;
        cfg.validate()?;

        self.intervals.probe()?;
        if cfg.ploidy == PloidyMode::SingleCopy {
            self.variants.probe()?;
        }
        ensure_output_dir(&cfg.output_dir)?;

        let mut summary = PipelineSummary::default();

        let timer = StageTimer::new("Normalizing depth track");
        let normalized_depth = cfg.normalized_depth();
        let depth_stats =
            depth::normalize_file(&cfg.depth_track, &normalized_depth, cfg.on_error)?;
        summary.depth_rows = depth_stats.rows;
        summary.depth_skipped = depth_stats.skipped;
        timer.log_completion(depth_stats.rows);

        let timer = StageTimer::new("Indexing contig lengths");
        let lengths = ContigLengths::from_fasta(&cfg.assembly_fasta)?;
        summary.contigs_indexed = lengths.len() as u64;
        timer.log_completion(summary.contigs_indexed);

        let timer = StageTimer::new("Expanding alignment records");
        let correspondence = cfg.correspondence_bed();
        let expand_stats = cigar::expand_file(
            &cfg.alignment_bed,
            &lengths,
            &correspondence,
            cfg.emission,
            cfg.on_error,
        )?;
        summary.alignment_records = expand_stats.records;
        summary.alignment_skipped = expand_stats.skipped;
        summary.correspondences = expand_stats.emitted;
        timer.log_completion(expand_stats.emitted);

        info!("Restricting correspondence rows to exons ...");
        let exonic = cfg.exonic_bed();
        let run = self.intervals.intersect_write_a(&correspondence, &cfg.exon_bed, &exonic)?;
        route_stderr(cfg.on_stderr, self.intervals.name(), "intersect", &run)?;

        let timer = StageTimer::new("Remapping to assembly coordinates");
        let supertscoords = cfg.supertscoords_bed();
        let remap_stats =
            remap::remap_file(&exonic, &supertscoords, RemapMode::Extended, cfg.on_error)?;
        summary.exonic_positions = remap_stats.rows;
        timer.log_completion(remap_stats.rows);

        info!("Annotating exonic positions with depth ...");
        let outcome = depth_join(
            &self.intervals,
            &supertscoords,
            &normalized_depth,
            JoinMode::PerSite,
            &cfg.depth_annotated_bed(),
            cfg.on_stderr,
        )?;
        summary.callable_sites = outcome.matched;
        self.write_callable_sites(outcome.matched)?;

        let genotype_bed = match cfg.ploidy {
            PloidyMode::SingleCopy => {
                info!("Restricting variant calls ...");
                let (restricted, run) = self.variants.restrict_by_intervals(
                    &cfg.vcf,
                    &supertscoords,
                    &cfg.restriction_prefix(),
                )?;
                route_stderr(cfg.on_stderr, self.variants.name(), "restrict", &run)?;
                let bed = cfg.bridged_bed(&restricted);
                let header = cfg.bridged_header(&restricted);
                let stats = vcf_bridge::vcf_to_bed(&restricted, &bed, &header, cfg.on_error)?;
                summary.exonic_variants = stats.data_rows;
                bed
            }
            PloidyMode::Polyploid => {
                info!("Restricting variant calls through the interval domain ...");
                let bed = cfg.bridged_bed(&cfg.vcf);
                let header = cfg.bridged_header(&cfg.vcf);
                vcf_bridge::vcf_to_bed(&cfg.vcf, &bed, &header, cfg.on_error)?;
                let restricted_bed = cfg.exonic_variant_bed();
                let run = self.intervals.intersect_write_a(&bed, &supertscoords, &restricted_bed)?;
                route_stderr(cfg.on_stderr, self.intervals.name(), "intersect", &run)?;
                let stats = vcf_bridge::bed_to_vcf(
                    &restricted_bed,
                    &header,
                    &cfg.exonic_variant_vcf(),
                    cfg.on_error,
                )?;
                summary.exonic_variants = stats.data_rows;
                restricted_bed
            }
        };

        info!("Annotating genotypes with depth ...");
        depth_join(
            &self.intervals,
            &genotype_bed,
            &normalized_depth,
            JoinMode::PerSite,
            &cfg.genotype_depth_bed(&genotype_bed),
            cfg.on_stderr,
        )?;

        let metrics_path = cfg.metrics_path();
        let rows = [summary.clone()];
        DelimFile::default()
            .write_tsv(&metrics_path, &rows)
            .with_context(|| format!("Failed to write pipeline metrics: {}", metrics_path.display()))?;

        Ok(summary)
    }

    fn write_callable_sites(&self, count: u64) -> anyhow::Result<()> {
        let path = self.config.callable_sites_path();
        let io = Io::default();
        let mut writer = io
            .new_writer(&path)
            .with_context(|| format!("Failed to create callable-site count: {}", path.display()))?;
        writeln!(writer, "{count}")?;
        writer.flush()?;
        Ok(())
    }
}
