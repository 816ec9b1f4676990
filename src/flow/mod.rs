//! Flow rows as read from a labeled CSV: a shared header plus per-row cells.
//! Column names are whitespace-trimmed; cells are kept verbatim.

mod reader;

pub use reader::ChunkedFlowReader;

use crate::error::{Result, SubsetError};

/// Header of a flow file with its label column resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowHeader {
    columns: Vec<String>,
    label_index: usize,
}

impl FlowHeader {
    /// Trim column names and resolve the label column, failing with the observed names.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<String> = columns
            .into_iter()
            .map(|c| c.as_ref().trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        match resolve_label_column(&columns) {
            Some(label_index) => Ok(Self {
                columns,
                label_index,
            }),
            None => Err(SubsetError::Schema { columns }),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn label_index(&self) -> usize {
        self.label_index
    }

    pub fn label_column(&self) -> &str {
        &self.columns[self.label_index]
    }

    /// Exact (post-trim) column lookup.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// First column whose trimmed, lower-cased name is `label`.
pub fn resolve_label_column(columns: &[String]) -> Option<usize> {
    columns
        .iter()
        .position(|c| c.trim().to_lowercase() == "label")
}

/// One input row. Cells are positional against the [`FlowHeader`] it was read with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRecord {
    values: Vec<String>,
}

impl FlowRecord {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl<S: Into<String>> FromIterator<S> for FlowRecord {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
