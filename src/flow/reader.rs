//! Row-aligned chunked CSV reading. Both passes stream the file through this reader,
//! so at most one chunk of rows is resident at a time.

use super::{FlowHeader, FlowRecord};
use crate::error::{Result, SubsetError};
use csv::ByteRecord;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct ChunkedFlowReader {
    path: PathBuf,
    reader: csv::Reader<File>,
    header: Arc<FlowHeader>,
    chunk_size: usize,
    record: ByteRecord,
    exhausted: bool,
}

impl ChunkedFlowReader {
    /// Open `path` and resolve its header. `chunk_size` is clamped to at least one row.
    pub fn open(path: &Path, chunk_size: usize) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| SubsetError::input(path, e))?;
        let raw = reader
            .byte_headers()
            .map_err(|e| SubsetError::input(path, e))?
            .clone();
        let header = FlowHeader::new(raw.iter().map(|c| String::from_utf8_lossy(c).into_owned()))?;
        Ok(Self {
            path: path.to_path_buf(),
            reader,
            header: Arc::new(header),
            chunk_size: chunk_size.max(1),
            record: ByteRecord::new(),
            exhausted: false,
        })
    }

    pub fn header(&self) -> &Arc<FlowHeader> {
        &self.header
    }

    /// Read up to `chunk_size` rows; `None` once the file is drained.
    /// Invalid UTF-8 in cells is replaced with U+FFFD.
    pub fn next_chunk(&mut self) -> Result<Option<Vec<FlowRecord>>> {
        if self.exhausted {
            return Ok(None);
        }
        let mut chunk = Vec::with_capacity(self.chunk_size.min(4096));
        while chunk.len() < self.chunk_size {
            let more = self
                .reader
                .read_byte_record(&mut self.record)
                .map_err(|e| SubsetError::input(&self.path, e))?;
            if !more {
                self.exhausted = true;
                break;
            }
            chunk.push(
                self.record
                    .iter()
                    .map(|cell| String::from_utf8_lossy(cell).into_owned())
                    .collect::<FlowRecord>(),
            );
        }
        if chunk.is_empty() {
            Ok(None)
        } else {
            Ok(Some(chunk))
        }
    }
}
