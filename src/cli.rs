use crate::config::{SamplingRule, SubsetConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Balanced subset extraction for labeled flow CSVs", long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// JSON config file (defaults to $FLOW_SUBSET_CONFIG_PATH or config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count labels, sample a balanced subset, and normalize it
    Run(RunArgs),
    /// Count labels only and print them by descending frequency
    Count(CountArgs),
    /// Normalize an existing raw balanced subset into the canonical schema
    Normalize(NormalizeArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Source CSV path
    #[arg(long = "in", value_name = "CSV")]
    pub input: PathBuf,

    /// Output directory
    #[arg(long)]
    pub outdir: Option<PathBuf>,

    /// Maximum rows kept per label
    #[arg(long)]
    pub perlabel: Option<usize>,

    /// Sampling seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Rows read per chunk
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Population size used by replacement draws
    #[arg(long, value_enum)]
    pub rule: Option<SamplingRule>,
}

#[derive(Args, Debug)]
pub struct CountArgs {
    #[arg(long = "in", value_name = "CSV")]
    pub input: PathBuf,

    #[arg(long)]
    pub chunk_size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Raw balanced subset CSV
    #[arg(long = "in", value_name = "CSV")]
    pub input: PathBuf,

    /// Canonical CSV to write
    #[arg(long)]
    pub out: PathBuf,
}

impl RunArgs {
    /// Fold flag values over the file config.
    pub fn apply(&self, config: &mut SubsetConfig) {
        if let Some(dir) = &self.outdir {
            config.output.dir = dir.clone();
        }
        if let Some(cap) = self.perlabel {
            config.sampling.per_label_cap = cap;
        }
        if let Some(seed) = self.seed {
            config.sampling.seed = seed;
        }
        if let Some(chunk_size) = self.chunk_size {
            config.sampling.chunk_size = chunk_size;
        }
        if let Some(rule) = self.rule {
            config.sampling.rule = rule;
        }
    }
}

impl Cli {
    pub fn apply_logging(&self, config: &mut SubsetConfig) {
        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }
        if self.log_json {
            config.log.json = true;
        }
    }
}
