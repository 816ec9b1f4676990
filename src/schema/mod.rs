//! Canonical flow schema: a fixed field set independent of the source column naming,
//! annotated with a coarse security event type.

mod aliases;
mod normalize;

pub use aliases::{ColumnMap, SourceColumn, ALIAS_TABLE};
pub use normalize::{coerce_number, write_canonical, SchemaNormalizer};
pub(crate) use normalize::csv_write_error;

use crate::selection::normalized_key;
use serde::{Deserialize, Serialize};

/// Output column order of the canonical CSV.
pub const CANONICAL_COLUMNS: [&str; 11] = [
    "timestamp",
    "src_ip",
    "src_port",
    "dst_ip",
    "dst_port",
    "protocol",
    "pkts_total",
    "bytes_total",
    "flow_duration_ms",
    "label",
    "event_type",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    WebBruteforce,
    WebXss,
    WebSqlInjection,
    Benign,
    AttackOther,
}

impl EventType {
    /// First match wins, on the normalized lower-cased label.
    pub fn classify(label: &str) -> Self {
        let key = normalized_key(label);
        let web = key.contains("web attack");
        if web && key.contains("brute") {
            EventType::WebBruteforce
        } else if web && key.contains("xss") {
            EventType::WebXss
        } else if web && key.contains("sql") {
            EventType::WebSqlInjection
        } else if key.contains("benign") {
            EventType::Benign
        } else {
            EventType::AttackOther
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::WebBruteforce => "web_bruteforce",
            EventType::WebXss => "web_xss",
            EventType::WebSqlInjection => "web_sql_injection",
            EventType::Benign => "benign",
            EventType::AttackOther => "attack_other",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flow in canonical shape. `None` means the source column was absent
/// (or, for duration, not numeric); values are never invented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub timestamp: Option<String>,
    pub src_ip: Option<String>,
    pub src_port: Option<String>,
    pub dst_ip: Option<String>,
    pub dst_port: Option<String>,
    pub protocol: Option<String>,
    pub pkts_total: Option<f64>,
    pub bytes_total: Option<f64>,
    pub flow_duration_ms: Option<f64>,
    pub label: String,
    pub event_type: EventType,
}

impl CanonicalRecord {
    /// CSV cells in [`CANONICAL_COLUMNS`] order; nulls become empty cells.
    pub fn to_row(&self) -> [String; 11] {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let num = |v: Option<f64>| v.map(format_number).unwrap_or_default();
        [
            text(&self.timestamp),
            text(&self.src_ip),
            text(&self.src_port),
            text(&self.dst_ip),
            text(&self.dst_port),
            text(&self.protocol),
            num(self.pkts_total),
            num(self.bytes_total),
            num(self.flow_duration_ms),
            self.label.clone(),
            self.event_type.as_str().to_string(),
        ]
    }
}

/// Integral values print without a fractional part; others use shortest round-trip form.
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        v.to_string()
    }
}
