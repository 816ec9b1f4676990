//! Streams the input in chunks and tallies literal label values.

use super::LabelCountMap;
use crate::error::Result;
use crate::flow::{ChunkedFlowReader, FlowHeader};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub struct LabelAccountant {
    chunk_size: usize,
}

/// Outcome of pass 1.
#[derive(Debug, Clone)]
pub struct LabelTally {
    pub header: Arc<FlowHeader>,
    pub counts: LabelCountMap,
    pub rows: u64,
    pub chunks: u64,
}

impl LabelAccountant {
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    /// Count every row's label. Fails with a schema error when no label column exists.
    pub fn count(&self, path: &Path) -> Result<LabelTally> {
        let mut reader = ChunkedFlowReader::open(path, self.chunk_size)?;
        let header = Arc::clone(reader.header());
        let label_index = header.label_index();
        info!(
            path = %path.display(),
            label_column = header.label_column(),
            columns = header.len(),
            "pass 1: counting labels"
        );

        let mut counts = LabelCountMap::new();
        let mut rows = 0u64;
        let mut chunks = 0u64;
        while let Some(chunk) = reader.next_chunk()? {
            let mut tally = LabelCountMap::new();
            for record in &chunk {
                tally.add(record.get(label_index).unwrap_or(""), 1);
            }
            rows += chunk.len() as u64;
            chunks += 1;
            debug!(chunk = chunks, rows = chunk.len(), labels = tally.len(), "chunk tallied");
            counts.merge(tally);
        }

        info!(rows, chunks, labels = counts.len(), "pass 1 complete");
        Ok(LabelTally {
            header,
            counts,
            rows,
            chunks,
        })
    }
}
