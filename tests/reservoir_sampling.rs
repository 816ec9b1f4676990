//! Pass 2 reservoirs: bounds, ordering, determinism, and both replacement rules.

mod common;

use common::*;
use flow_subset::{
    accounting::LabelAccountant,
    config::{SamplingConfig, SamplingRule},
    sampling::sample_file,
    select_labels, ChosenLabelSet, FlowRecord, LabelCountMap, ReservoirSampler,
};
use std::collections::HashSet;

fn config(cap: usize, chunk_size: usize, rule: SamplingRule) -> SamplingConfig {
    SamplingConfig {
        per_label_cap: cap,
        seed: 42,
        chunk_size,
        rule,
    }
}

fn row(id: usize, label: &str) -> FlowRecord {
    [format!("r{id}"), label.to_string()].into_iter().collect()
}

#[test]
fn reservoir_length_is_min_of_cap_and_count() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(
        dir.path(),
        "in.csv",
        interleaved_csv(&[(BENIGN, 500), (BRUTE, 7), (XSS, 25), (SQL, 60)]),
    );
    let tally = LabelAccountant::new(64).count(&input).unwrap();
    let chosen = select_labels(&tally.counts);
    for rule in [SamplingRule::PassOneTotal, SamplingRule::RunningCount] {
        for cap in [1, 7, 25, 1000] {
            let subset = sample_file(&input, &chosen, &tally.counts, &config(cap, 64, rule)).unwrap();
            assert_eq!(subset.blocks.len(), chosen.len());
            for block in &subset.blocks {
                let expected = cap.min(tally.counts.count(&block.label) as usize);
                assert_eq!(block.rows.len(), expected, "{} cap {cap} {rule:?}", block.label);
                let label_index = subset.header.label_index();
                assert!(block.rows.iter().all(|r| r.get(label_index) == Some(block.label.as_str())));
                let ids: HashSet<_> = block.rows.iter().map(|r| r.get(0).unwrap()).collect();
                assert_eq!(ids.len(), block.rows.len(), "duplicate rows kept");
            }
        }
    }
}

#[test]
fn blocks_follow_chosen_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "in.csv", cic_csv(&[(BENIGN, 40), (XSS, 9), (BRUTE, 9)]));
    let tally = LabelAccountant::new(8).count(&input).unwrap();
    let chosen = select_labels(&tally.counts);
    let subset =
        sample_file(&input, &chosen, &tally.counts, &config(5, 8, SamplingRule::PassOneTotal)).unwrap();
    let order: Vec<&str> = subset.blocks.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(order, vec![BRUTE, XSS, BENIGN]);
    assert_eq!(subset.len(), 15);
}

#[test]
fn under_capacity_keeps_every_row_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "in.csv", interleaved_csv(&[(BENIGN, 12), (SQL, 4)]));
    let tally = LabelAccountant::new(5).count(&input).unwrap();
    let chosen = select_labels(&tally.counts);
    let subset =
        sample_file(&input, &chosen, &tally.counts, &config(50, 5, SamplingRule::PassOneTotal)).unwrap();
    let sql_ids: Vec<&str> = subset.blocks[0].rows.iter().map(|r| r.get(0).unwrap()).collect();
    assert_eq!(sql_ids, vec!["f1", "f3", "f5", "f7"]);
    assert_eq!(subset.blocks[1].rows.len(), 12);
}

#[test]
fn same_seed_and_chunking_reproduce_reservoirs() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "in.csv", interleaved_csv(&[(BENIGN, 2_000), (XSS, 300)]));
    let tally = LabelAccountant::new(128).count(&input).unwrap();
    let chosen = select_labels(&tally.counts);
    for rule in [SamplingRule::PassOneTotal, SamplingRule::RunningCount] {
        let cfg = config(30, 128, rule);
        let a = sample_file(&input, &chosen, &tally.counts, &cfg).unwrap();
        let b = sample_file(&input, &chosen, &tally.counts, &cfg).unwrap();
        assert_eq!(a.blocks, b.blocks);
    }
}

#[test]
fn unchosen_labels_are_ignored() {
    let counts: LabelCountMap = [("a", 3), ("b", 3)].into_iter().collect();
    let chosen = ChosenLabelSet::from(vec!["a".to_string()]);
    let mut sampler = ReservoirSampler::new(&chosen, &counts, 2, SamplingRule::PassOneTotal, 7);
    for i in 0..3 {
        sampler.offer("a", row(i, "a"));
        sampler.offer("b", row(i, "b"));
    }
    assert!(sampler.reservoir("b").is_none());
    let a = sampler.reservoir("a").unwrap();
    assert_eq!(a.seen(), 3);
    assert!(a.is_full());
    let blocks = sampler.finish();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].rows.len(), 2);
}

#[test]
fn replacement_slots_stay_within_capacity() {
    let counts: LabelCountMap = [("a", 10_000)].into_iter().collect();
    let chosen = ChosenLabelSet::from(vec!["a".to_string()]);
    for rule in [SamplingRule::PassOneTotal, SamplingRule::RunningCount] {
        let mut sampler = ReservoirSampler::new(&chosen, &counts, 3, rule, 99);
        for i in 0..10_000 {
            sampler.offer("a", row(i, "a"));
            assert!(sampler.reservoir("a").unwrap().rows().len() <= 3);
        }
        let rows = sampler.finish().remove(0).rows;
        assert_eq!(rows.len(), 3);
        if rule == SamplingRule::RunningCount {
            // keeping all of r0..r2 through 10k offers has probability ~1e-11
            assert_ne!(
                rows.iter().map(|r| r.get(0).unwrap()).collect::<Vec<_>>(),
                vec!["r0", "r1", "r2"]
            );
        }
    }
}

#[test]
fn pass_one_total_tolerates_missing_count() {
    let counts = LabelCountMap::new();
    let chosen = ChosenLabelSet::from(vec!["a".to_string()]);
    let mut sampler = ReservoirSampler::new(&chosen, &counts, 1, SamplingRule::PassOneTotal, 1);
    for i in 0..5 {
        sampler.offer("a", row(i, "a"));
    }
    assert_eq!(sampler.reservoir("a").unwrap().rows().len(), 1);
}

#[test]
fn slots_follow_chosen_order() {
    let counts: LabelCountMap = [("a", 2), ("b", 2), ("c", 2)].into_iter().collect();
    let chosen = ChosenLabelSet::from(vec!["b".to_string(), "a".to_string()]);
    let mut sampler = ReservoirSampler::new(&chosen, &counts, 5, SamplingRule::PassOneTotal, 3);
    assert_eq!(sampler.slot("b"), Some(0));
    assert_eq!(sampler.slot("a"), Some(1));
    assert_eq!(sampler.slot("c"), None);

    sampler.offer_at(1, row(0, "a"));
    sampler.offer_at(0, row(1, "b"));
    sampler.offer_at(1, row(2, "a"));
    let blocks = sampler.finish();
    assert_eq!(blocks[0].label, "b");
    assert_eq!(blocks[0].rows, vec![row(1, "b")]);
    assert_eq!(blocks[1].rows, vec![row(0, "a"), row(2, "a")]);
}
