//! Crate error type. Every failure is fatal to the run; there are no retries.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubsetError {
    /// No header column matches "label" (case- and whitespace-insensitive).
    #[error("no 'Label' column found; observed columns: {columns:?}")]
    Schema { columns: Vec<String> },
    /// Missing, unreadable, or malformed CSV input.
    #[error("cannot read CSV input '{}': {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(String),
}

impl SubsetError {
    pub(crate) fn input(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        SubsetError::Input {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SubsetError>;
