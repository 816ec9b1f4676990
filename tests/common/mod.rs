//! Synthetic flow CSV fixtures.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// CIC-IDS2017 style header (note the leading spaces the real files carry).
pub const CIC2017_HEADER: &str = "Flow ID, Source IP, Source Port, Destination IP, Destination Port, Protocol, Timestamp, Flow Duration, Total Fwd Packets, Total Backward Packets,Total Length of Fwd Packets, Total Length of Bwd Packets, Label";

pub const SQL: &str = "Web Attack - Sql Injection";
pub const XSS: &str = "Web Attack - XSS";
pub const BRUTE: &str = "Web Attack - Brute Force";
pub const BENIGN: &str = "BENIGN";

/// One CIC-2017 row; `id` makes every row distinguishable.
pub fn cic_row(id: usize, label: &str) -> String {
    format!(
        "f{id},10.0.{a}.{b},{sport},192.168.10.50,80,6,3/7/2017 8:55,{dur},{fwd},{bwd},{fb},{bb},{label}",
        a = (id / 250) % 250,
        b = id % 250,
        sport = 1024 + id % 60000,
        dur = 1000 + id,
        fwd = 1 + id % 7,
        bwd = id % 5,
        fb = 60 * (1 + id % 7),
        bb = 40 * (id % 5),
    )
}

/// Rows emitted block by block in the given `(label, count)` order, ids running across blocks.
pub fn cic_csv(blocks: &[(&str, usize)]) -> String {
    let mut out = String::from(CIC2017_HEADER);
    out.push('\n');
    let mut id = 0;
    for (label, n) in blocks {
        for _ in 0..*n {
            writeln!(out, "{}", cic_row(id, label)).unwrap();
            id += 1;
        }
    }
    out
}

/// Rows interleaved round-robin across labels until each label's count is used up.
pub fn interleaved_csv(blocks: &[(&str, usize)]) -> String {
    let mut out = String::from(CIC2017_HEADER);
    out.push('\n');
    let mut left: Vec<usize> = blocks.iter().map(|(_, n)| *n).collect();
    let mut id = 0;
    while left.iter().any(|n| *n > 0) {
        for (i, (label, _)) in blocks.iter().enumerate() {
            if left[i] > 0 {
                writeln!(out, "{}", cic_row(id, label)).unwrap();
                left[i] -= 1;
                id += 1;
            }
        }
    }
    out
}

pub fn write_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Parse a written CSV into (header, rows).
pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (header, rows)
}
