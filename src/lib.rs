//! Flow Subset: label-balanced, memory-bounded subsets of labeled network-flow CSVs.
//!
//! Modular structure:
//! - [`flow`]: Header resolution and row-aligned chunked CSV reading
//! - [`accounting`]: Pass 1: exact per-label counts
//! - [`selection`]: Label normalization and the retained-label heuristic
//! - [`sampling`]: Pass 2: per-label reservoirs
//! - [`schema`]: Canonical schema, column aliases, event types
//! - [`pipeline`]: Orchestration, staged artifacts, run manifest
//! - [`analysis`]: Downstream analysis service payloads
//! - [`logging`]: Structured logging

pub mod accounting;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod flow;
pub mod logging;
pub mod pipeline;
pub mod sampling;
pub mod schema;
pub mod selection;

pub use accounting::{LabelAccountant, LabelCountMap};
pub use config::{SamplingConfig, SamplingRule, SubsetConfig};
pub use error::{Result, SubsetError};
pub use flow::{FlowHeader, FlowRecord};
pub use logging::StructuredLogger;
pub use pipeline::{Pipeline, RunSummary};
pub use sampling::{BalancedSubset, ReservoirSampler};
pub use schema::{CanonicalRecord, EventType, SchemaNormalizer};
pub use selection::{normalize_label, select_labels, ChosenLabelSet};
