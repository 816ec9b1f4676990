//! Pass 2: per-label bounded reservoirs over a re-streamed input.

mod reservoir;

pub use reservoir::{Reservoir, ReservoirSampler};

use crate::accounting::LabelCountMap;
use crate::config::SamplingConfig;
use crate::error::Result;
use crate::flow::{ChunkedFlowReader, FlowHeader, FlowRecord};
use crate::selection::ChosenLabelSet;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Frozen rows of one chosen label, in reservoir slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelBlock {
    pub label: String,
    pub rows: Vec<FlowRecord>,
}

/// Concatenated reservoirs in chosen-label order, with the header they were read under.
#[derive(Debug, Clone)]
pub struct BalancedSubset {
    pub header: Arc<FlowHeader>,
    pub blocks: Vec<LabelBlock>,
}

impl BalancedSubset {
    pub fn rows(&self) -> impl Iterator<Item = &FlowRecord> {
        self.blocks.iter().flat_map(|b| b.rows.iter())
    }

    pub fn len(&self) -> usize {
        self.blocks.iter().map(|b| b.rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stream `path` once more and fill a reservoir per chosen label.
pub fn sample_file(
    path: &Path,
    chosen: &ChosenLabelSet,
    counts: &LabelCountMap,
    config: &SamplingConfig,
) -> Result<BalancedSubset> {
    let mut reader = ChunkedFlowReader::open(path, config.chunk_size)?;
    let header = Arc::clone(reader.header());
    let label_index = header.label_index();
    let mut sampler = ReservoirSampler::new(
        chosen,
        counts,
        config.per_label_cap,
        config.rule,
        config.seed,
    );
    info!(
        labels = chosen.len(),
        cap = config.per_label_cap,
        rule = ?config.rule,
        seed = config.seed,
        "pass 2: sampling"
    );

    while let Some(chunk) = reader.next_chunk()? {
        for record in chunk {
            let slot = record.get(label_index).and_then(|l| sampler.slot(l));
            if let Some(slot) = slot {
                sampler.offer_at(slot, record);
            }
        }
    }

    let blocks = sampler.finish();
    for block in &blocks {
        info!(label = %block.label, rows = block.rows.len(), "reservoir frozen");
    }
    Ok(BalancedSubset { header, blocks })
}
