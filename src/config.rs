//! Run configuration. File values are defaults; CLI flags override them.

use crate::error::{Result, SubsetError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Env var naming the JSON config file.
pub const CONFIG_PATH_ENV: &str = "FLOW_SUBSET_CONFIG_PATH";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubsetConfig {
    /// Pass sizes, cap and seed
    pub sampling: SamplingConfig,
    /// Where artifacts land
    pub output: OutputConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Maximum rows kept per chosen label
    pub per_label_cap: usize,
    /// Seed for the reservoir PRNG
    pub seed: u64,
    /// Rows read per chunk in both passes
    pub chunk_size: usize,
    /// Population size used for replacement draws
    pub rule: SamplingRule,
}

/// Which `n` the replacement draw `j in [0, n-1]` uses once a reservoir is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SamplingRule {
    /// The label's final pass-1 count, constant across pass 2.
    #[default]
    PassOneTotal,
    /// Rows of the label seen so far in pass 2 (textbook Algorithm R).
    RunningCount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            per_label_cap: 3000,
            seed: 42,
            chunk_size: 100_000,
            rule: SamplingRule::PassOneTotal,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("cicids_subset_web"),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.per_label_cap == 0 {
            return Err(SubsetError::Config("per_label_cap must be at least 1".into()));
        }
        if self.chunk_size == 0 {
            return Err(SubsetError::Config("chunk_size must be at least 1".into()));
        }
        Ok(())
    }
}

impl SubsetConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<SubsetConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }

    /// Config path from the environment, falling back to `config.json`.
    pub fn default_path() -> PathBuf {
        std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.json"))
    }
}
