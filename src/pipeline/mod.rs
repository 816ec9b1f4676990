//! End-to-end run: count -> select -> sample -> normalize, persisting each stage's output.

mod artifacts;
mod manifest;

pub use artifacts::{ArtifactRecord, HashingWriter, StagedArtifacts};
pub use manifest::RunManifest;

use crate::accounting::{LabelAccountant, LabelCountMap};
use crate::config::SamplingConfig;
use crate::error::Result;
use crate::sampling::{sample_file, BalancedSubset};
use crate::schema::{csv_write_error, write_canonical, SchemaNormalizer};
use crate::selection::select_labels;
use chrono::Utc;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

pub const LABEL_COUNTS_FILE: &str = "label_counts.json";
pub const RAW_SUBSET_FILE: &str = "subset_web_raw_balanced.csv";
pub const CANONICAL_SUBSET_FILE: &str = "subset_web_preprocessed.csv";
pub const MANIFEST_FILE: &str = "run_manifest.json";

/// What a finished run reports back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub output_dir: PathBuf,
    pub input_rows: u64,
    pub chosen_labels: Vec<String>,
    pub reservoir_sizes: Vec<usize>,
    pub raw_rows: usize,
    pub canonical_rows: usize,
    /// Ten most frequent labels
    pub top_labels: Vec<(String, u64)>,
}

pub struct Pipeline {
    input: PathBuf,
    output_dir: PathBuf,
    sampling: SamplingConfig,
}

impl Pipeline {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, sampling: SamplingConfig) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            sampling,
        }
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    /// Run every stage. Any failure aborts; previously staged files are discarded.
    pub fn run(&self) -> Result<RunSummary> {
        self.sampling.validate()?;
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let _span = tracing::info_span!("pipeline", %run_id).entered();
        info!(input = %self.input.display(), output_dir = %self.output_dir.display(), "run starting");

        // A stale manifest would vouch for artifacts this run is about to replace.
        let manifest_path = self.output_path(MANIFEST_FILE);
        if manifest_path.exists() {
            std::fs::remove_file(&manifest_path)?;
        }

        let tally = LabelAccountant::new(self.sampling.chunk_size).count(&self.input)?;
        let chosen = select_labels(&tally.counts);
        info!(chosen = ?chosen.labels(), "labels selected");

        let mut staged = StagedArtifacts::new(&self.output_dir)?;
        staged.write(LABEL_COUNTS_FILE, None, |w| write_label_counts(w, &tally.counts))?;

        let subset = sample_file(&self.input, &chosen, &tally.counts, &self.sampling)?;
        staged.write(RAW_SUBSET_FILE, Some(subset.len() as u64), |w| {
            write_raw_subset(w, &subset)
        })?;

        let canonical = SchemaNormalizer::normalize_subset(&subset);
        staged.write(CANONICAL_SUBSET_FILE, Some(canonical.len() as u64), |w| {
            write_canonical(w, &canonical).map(|_| ())
        })?;

        let artifacts = staged.commit()?;
        let manifest = RunManifest {
            run_id,
            started_at,
            finished_at: Utc::now(),
            input: self.input.clone(),
            input_rows: tally.rows,
            sampling: self.sampling.clone(),
            chosen_labels: chosen.labels().to_vec(),
            artifacts,
        };
        manifest.write(&manifest_path)?;
        info!(raw_rows = subset.len(), canonical_rows = canonical.len(), "run complete");

        Ok(RunSummary {
            run_id,
            output_dir: self.output_dir.clone(),
            input_rows: tally.rows,
            chosen_labels: chosen.labels().to_vec(),
            reservoir_sizes: subset.blocks.iter().map(|b| b.rows.len()).collect(),
            raw_rows: subset.len(),
            canonical_rows: canonical.len(),
            top_labels: tally
                .counts
                .sorted_desc()
                .into_iter()
                .take(10)
                .map(|(l, n)| (l.to_string(), n))
                .collect(),
        })
    }
}

/// Pretty JSON, labels by descending count.
pub fn write_label_counts<W: Write>(writer: W, counts: &LabelCountMap) -> Result<()> {
    serde_json::to_writer_pretty(writer, counts)?;
    Ok(())
}

/// Trimmed input header, then every reservoir row verbatim, block by block.
pub fn write_raw_subset<W: Write>(writer: W, subset: &BalancedSubset) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(subset.header.columns())
        .map_err(csv_write_error)?;
    for row in subset.rows() {
        csv.write_record(row.values()).map_err(csv_write_error)?;
    }
    csv.flush()?;
    Ok(())
}

/// Pass 1 only.
pub fn count_labels(input: &Path, chunk_size: usize) -> Result<LabelCountMap> {
    Ok(LabelAccountant::new(chunk_size).count(input)?.counts)
}
