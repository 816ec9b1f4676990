//! Declarative column aliases, covering both CIC flow-meter naming conventions.
//! Resolved once per header; first alias present wins.

use crate::flow::FlowHeader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceColumn {
    Timestamp,
    SrcIp,
    SrcPort,
    DstIp,
    DstPort,
    Protocol,
    FwdPackets,
    BwdPackets,
    FwdBytes,
    BwdBytes,
    FlowDuration,
}

pub const ALIAS_TABLE: &[(SourceColumn, &[&str])] = &[
    (SourceColumn::Timestamp, &["Timestamp", "timestamp"]),
    (SourceColumn::SrcIp, &["Source IP", "Src IP", "src_ip"]),
    (SourceColumn::SrcPort, &["Source Port", "Src Port", "src_port"]),
    (SourceColumn::DstIp, &["Destination IP", "Dst IP", "dst_ip"]),
    (SourceColumn::DstPort, &["Destination Port", "Dst Port", "dst_port"]),
    (SourceColumn::Protocol, &["Protocol", "protocol"]),
    (SourceColumn::FwdPackets, &["Tot Fwd Pkts", "Total Fwd Packets"]),
    (SourceColumn::BwdPackets, &["Tot Bwd Pkts", "Total Backward Packets"]),
    (SourceColumn::FwdBytes, &["TotLen Fwd Pkts", "Total Length of Fwd Packets"]),
    (SourceColumn::BwdBytes, &["TotLen Bwd Pkts", "Total Length of Bwd Packets"]),
    (SourceColumn::FlowDuration, &["Flow Duration", "flow_duration"]),
];

/// Column index per source column for one header, plus the label column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    resolved: Vec<(SourceColumn, Option<usize>)>,
    label: usize,
}

impl ColumnMap {
    pub fn resolve(header: &FlowHeader) -> Self {
        let resolved = ALIAS_TABLE
            .iter()
            .map(|(column, aliases)| {
                let index = aliases.iter().find_map(|name| header.index_of(name));
                (*column, index)
            })
            .collect();
        Self {
            resolved,
            label: header.label_index(),
        }
    }

    pub fn index(&self, column: SourceColumn) -> Option<usize> {
        self.resolved
            .iter()
            .find(|(c, _)| *c == column)
            .and_then(|(_, i)| *i)
    }

    pub fn label(&self) -> usize {
        self.label
    }
}
