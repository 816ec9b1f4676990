//! Raw balanced rows -> canonical records.

use super::{CanonicalRecord, ColumnMap, EventType, SourceColumn, CANONICAL_COLUMNS};
use crate::error::{Result, SubsetError};
use crate::flow::{ChunkedFlowReader, FlowHeader, FlowRecord};
use crate::sampling::BalancedSubset;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Lenient numeric parse; `None` for empty or non-numeric cells.
pub fn coerce_number(cell: Option<&str>) -> Option<f64> {
    cell.and_then(|c| c.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
}

pub struct SchemaNormalizer {
    columns: ColumnMap,
}

impl SchemaNormalizer {
    pub fn new(header: &FlowHeader) -> Self {
        let columns = ColumnMap::resolve(header);
        debug!(?columns, "resolved canonical columns");
        Self { columns }
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    fn text(&self, record: &FlowRecord, column: SourceColumn) -> Option<String> {
        self.columns
            .index(column)
            .map(|i| record.get(i).unwrap_or("").to_string())
    }

    /// Sum of two coerced columns (bad cells count as 0); `None` unless both columns exist.
    fn pair_total(&self, record: &FlowRecord, a: SourceColumn, b: SourceColumn) -> Option<f64> {
        let a = self.columns.index(a)?;
        let b = self.columns.index(b)?;
        let value = |i: usize| coerce_number(record.get(i)).unwrap_or(0.0);
        Some(value(a) + value(b))
    }

    pub fn normalize(&self, record: &FlowRecord) -> CanonicalRecord {
        let label = record.get(self.columns.label()).unwrap_or("").to_string();
        let event_type = EventType::classify(&label);
        CanonicalRecord {
            timestamp: self.text(record, SourceColumn::Timestamp),
            src_ip: self.text(record, SourceColumn::SrcIp),
            src_port: self.text(record, SourceColumn::SrcPort),
            dst_ip: self.text(record, SourceColumn::DstIp),
            dst_port: self.text(record, SourceColumn::DstPort),
            protocol: self.text(record, SourceColumn::Protocol),
            pkts_total: self.pair_total(record, SourceColumn::FwdPackets, SourceColumn::BwdPackets),
            bytes_total: self.pair_total(record, SourceColumn::FwdBytes, SourceColumn::BwdBytes),
            flow_duration_ms: self
                .columns
                .index(SourceColumn::FlowDuration)
                .and_then(|i| coerce_number(record.get(i))),
            label,
            event_type,
        }
    }

    pub fn normalize_subset(subset: &BalancedSubset) -> Vec<CanonicalRecord> {
        let normalizer = SchemaNormalizer::new(&subset.header);
        subset.rows().map(|r| normalizer.normalize(r)).collect()
    }

    /// Normalize an already-written raw subset file.
    pub fn normalize_file(path: &Path, chunk_size: usize) -> Result<Vec<CanonicalRecord>> {
        let mut reader = ChunkedFlowReader::open(path, chunk_size)?;
        let normalizer = SchemaNormalizer::new(reader.header());
        let mut out = Vec::new();
        while let Some(chunk) = reader.next_chunk()? {
            out.extend(chunk.iter().map(|r| normalizer.normalize(r)));
        }
        info!(path = %path.display(), rows = out.len(), "normalized raw subset");
        Ok(out)
    }
}

/// Write canonical records as CSV with the fixed header.
pub fn write_canonical<W: Write>(writer: W, records: &[CanonicalRecord]) -> Result<W> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CANONICAL_COLUMNS)
        .map_err(csv_write_error)?;
    for record in records {
        csv.write_record(record.to_row()).map_err(csv_write_error)?;
    }
    csv.into_inner()
        .map_err(|e| SubsetError::Io(e.into_error()))
}

pub(crate) fn csv_write_error(e: csv::Error) -> SubsetError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => SubsetError::Io(io),
        other => SubsetError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{:?}", other),
        )),
    }
}
