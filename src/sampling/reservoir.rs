//! Reservoirs keyed by chosen label, all drawing from one seeded generator in row order.

use super::LabelBlock;
use crate::accounting::LabelCountMap;
use crate::config::SamplingRule;
use crate::flow::FlowRecord;
use crate::selection::ChosenLabelSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Bounded buffer for one label. `rows.len() <= cap` always holds.
#[derive(Debug, Clone)]
pub struct Reservoir {
    label: String,
    cap: usize,
    /// Pass-1 count for this label
    total: u64,
    /// Rows offered so far in pass 2
    seen: u64,
    rows: Vec<FlowRecord>,
}

impl Reservoir {
    fn new(label: String, cap: usize, total: u64) -> Self {
        Self {
            label,
            cap,
            total,
            seen: 0,
            rows: Vec::with_capacity(cap.min(total as usize)),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rows(&self) -> &[FlowRecord] {
        &self.rows
    }

    pub fn seen(&self) -> u64 {
        self.seen
    }

    pub fn is_full(&self) -> bool {
        self.rows.len() >= self.cap
    }

    fn offer(&mut self, record: FlowRecord, rule: SamplingRule, rng: &mut StdRng) {
        self.seen += 1;
        if !self.is_full() {
            self.rows.push(record);
            return;
        }
        if self.cap == 0 {
            return;
        }
        let n = match rule {
            // max() only matters if the file grew between passes
            SamplingRule::PassOneTotal => self.total.max(self.seen),
            SamplingRule::RunningCount => self.seen,
        };
        let j = rng.gen_range(0..n);
        if j < self.cap as u64 {
            self.rows[j as usize] = record;
        }
    }
}

/// Owns every reservoir for the duration of pass 2.
pub struct ReservoirSampler {
    reservoirs: Vec<Reservoir>,
    index: HashMap<String, usize>,
    rule: SamplingRule,
    rng: StdRng,
}

impl ReservoirSampler {
    pub fn new(
        chosen: &ChosenLabelSet,
        counts: &LabelCountMap,
        cap: usize,
        rule: SamplingRule,
        seed: u64,
    ) -> Self {
        let reservoirs: Vec<Reservoir> = chosen
            .iter()
            .map(|label| Reservoir::new(label.to_string(), cap, counts.count(label)))
            .collect();
        let index = reservoirs
            .iter()
            .enumerate()
            .map(|(i, r)| (r.label.clone(), i))
            .collect();
        Self {
            reservoirs,
            index,
            rule,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Reservoir slot of a chosen label.
    pub fn slot(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Offer one row to the reservoir at `slot`, as returned by [`ReservoirSampler::slot`].
    pub fn offer_at(&mut self, slot: usize, record: FlowRecord) {
        self.reservoirs[slot].offer(record, self.rule, &mut self.rng);
    }

    /// Offer one row under its literal label. Rows of unchosen labels are dropped.
    pub fn offer(&mut self, label: &str, record: FlowRecord) {
        if let Some(slot) = self.slot(label) {
            self.offer_at(slot, record);
        }
    }

    pub fn reservoir(&self, label: &str) -> Option<&Reservoir> {
        self.index.get(label).map(|&i| &self.reservoirs[i])
    }

    /// Freeze into label blocks, in chosen-label order.
    pub fn finish(self) -> Vec<LabelBlock> {
        self.reservoirs
            .into_iter()
            .map(|r| LabelBlock {
                label: r.label,
                rows: r.rows,
            })
            .collect()
    }
}
