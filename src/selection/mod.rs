//! Label selection: which labels survive into the balanced subset, and in what order.

mod label;

pub use label::{normalize_label, normalized_key};

use crate::accounting::LabelCountMap;
use serde::Serialize;

/// Web-attack subtype priority; lower ranks are kept first. Unmatched subtypes rank last.
pub const WEB_ATTACK_RANKS: &[(&str, usize)] = &[("sql", 0), ("brute", 1), ("xss", 2)];

/// Attack-like labels kept per run, before the benign label is appended.
pub const MAX_ATTACK_LABELS: usize = 3;

const WEB_ATTACK_MARKER: &str = "web attack";
const BENIGN: &str = "benign";

/// Ordered labels to retain. Order drives the row order of every output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChosenLabelSet {
    labels: Vec<String>,
}

impl ChosenLabelSet {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for ChosenLabelSet {
    fn from(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

pub fn web_attack_rank(key: &str) -> usize {
    WEB_ATTACK_RANKS
        .iter()
        .find(|(needle, _)| key.contains(needle))
        .map(|(_, rank)| *rank)
        .unwrap_or(WEB_ATTACK_RANKS.len())
}

pub fn is_web_attack(key: &str) -> bool {
    key.contains(WEB_ATTACK_MARKER)
}

/// Up to three web-attack labels ranked by subtype, or failing that the three most
/// frequent non-benign labels; the benign label, when present, is appended last.
pub fn select_labels(counts: &LabelCountMap) -> ChosenLabelSet {
    let keyed: Vec<(&str, String)> = counts
        .labels()
        .map(|label| (label, normalized_key(label)))
        .collect();

    let benign = keyed
        .iter()
        .find(|(_, key)| key == BENIGN)
        .map(|(label, _)| *label);

    let mut web_like: Vec<(&str, usize)> = keyed
        .iter()
        .filter(|(_, key)| is_web_attack(key))
        .map(|(label, key)| (*label, web_attack_rank(key)))
        .collect();

    let mut chosen: Vec<String> = if !web_like.is_empty() {
        web_like.sort_by_key(|(_, rank)| *rank);
        web_like
            .into_iter()
            .take(MAX_ATTACK_LABELS)
            .map(|(label, _)| label.to_string())
            .collect()
    } else {
        counts
            .sorted_desc()
            .into_iter()
            .filter(|(label, _)| Some(*label) != benign)
            .take(MAX_ATTACK_LABELS)
            .map(|(label, _)| label.to_string())
            .collect()
    };

    if let Some(benign) = benign {
        chosen.push(benign.to_string());
    }
    ChosenLabelSet { labels: chosen }
}
