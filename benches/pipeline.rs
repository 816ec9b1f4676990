//! Streaming pass benchmark: label counting and reservoir sampling over a synthetic file.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flow_subset::accounting::LabelAccountant;
use flow_subset::config::{SamplingConfig, SamplingRule};
use flow_subset::sampling::sample_file;
use flow_subset::select_labels;
use std::fmt::Write as _;
use std::path::PathBuf;
use tempfile::TempDir;

const LABELS: [&str; 4] = ["BENIGN", "Web Attack - XSS", "Web Attack - Sql Injection", "DoS Hulk"];

fn make_flow_file(rows: usize) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flows.csv");
    let mut text = String::from(
        "Source IP,Source Port,Destination IP,Destination Port,Protocol,Timestamp,Flow Duration,Tot Fwd Pkts,Tot Bwd Pkts,TotLen Fwd Pkts,TotLen Bwd Pkts,Label\n",
    );
    for i in 0..rows {
        // mostly benign, like real captures
        let label = if i % 20 == 0 { LABELS[1 + i % 3] } else { LABELS[0] };
        writeln!(
            text,
            "10.0.{}.{},{},172.16.0.1,80,6,2017-07-06 09:{:02}:00,{},{},{},{},{},{}",
            (i / 250) % 250,
            i % 250,
            1024 + i % 60000,
            i % 60,
            1000 + i,
            1 + i % 9,
            i % 4,
            64 * (1 + i % 9),
            32 * (i % 4),
            label
        )
        .unwrap();
    }
    std::fs::write(&path, text).unwrap();
    (dir, path)
}

fn bench_count_labels(c: &mut Criterion) {
    let (_dir, path) = make_flow_file(50_000);
    let accountant = LabelAccountant::new(10_000);

    c.bench_function("count_labels_50k_rows", |b| {
        b.iter(|| black_box(accountant.count(black_box(&path)).unwrap()))
    });
}

fn bench_sample(c: &mut Criterion) {
    let (_dir, path) = make_flow_file(50_000);
    let tally = LabelAccountant::new(10_000).count(&path).unwrap();
    let chosen = select_labels(&tally.counts);

    for (name, rule) in [
        ("sample_50k_rows_pass_one_total", SamplingRule::PassOneTotal),
        ("sample_50k_rows_running_count", SamplingRule::RunningCount),
    ] {
        let config = SamplingConfig {
            per_label_cap: 500,
            rule,
            ..SamplingConfig::default()
        };
        c.bench_function(name, |b| {
            b.iter(|| black_box(sample_file(&path, &chosen, &tally.counts, &config).unwrap()))
        });
    }
}

criterion_group!(benches, bench_count_labels, bench_sample);
criterion_main!(benches);
