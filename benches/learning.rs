//! Learning and scoring benchmarks
//!
//! Measures one full learning run (sampling, candidate generation, coverage
//! reduction, second scan, validation) and one scoring pass over a test
//! sequence, on synthetic connection records.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench learning
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lerad::config::LearnConfig;
use lerad::dataset::Case;
use lerad::learning::{learn, Sampler};
use lerad::prediction::Predictor;

const PROTOCOLS: [&str; 3] = ["tcp", "udp", "icmp"];
const SERVICES: [&str; 6] = ["http", "smtp", "ftp", "dns", "ecr_i", "private"];
const FLAGS: [&str; 3] = ["SF", "S0", "REJ"];

/// Deterministic synthetic records with correlated protocol and service
fn synthetic_cases(count: usize) -> Vec<Case> {
    (0..count)
        .map(|i| {
            let protocol = PROTOCOLS[i % PROTOCOLS.len()];
            let service = SERVICES[(i % PROTOCOLS.len()) * 2 + (i / 7) % 2];
            let flag = FLAGS[(i / 11) % FLAGS.len()];
            let bytes = format!("b{}", (i / 13) % 5);
            Case::new([protocol, service, flag, bytes.as_str(), "normal"])
        })
        .collect()
}

fn config(sample_pairs: usize) -> LearnConfig {
    LearnConfig {
        sample_pairs,
        max_rules_per_pair: 4,
        sample_size: 100,
        validation_fraction: 0.1,
        seed: 23,
    }
}

/// Benchmark: full learning run for increasing pair counts
fn bench_learn(c: &mut Criterion) {
    let cases = synthetic_cases(5_000);
    let mut group = c.benchmark_group("learn");

    for pairs in [100, 500, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(pairs), &pairs, |b, &pairs| {
            let config = config(pairs);
            b.iter(|| {
                let mut sampler = Sampler::new(config.seed);
                black_box(learn(black_box(&cases), &config, &mut sampler))
            });
        });
    }

    group.finish();
}

/// Benchmark: scoring a test sequence against a learned rule set
fn bench_score(c: &mut Criterion) {
    let training = synthetic_cases(5_000);
    let config = config(1000);
    let Ok(outcome) = learn(&training, &config, &mut Sampler::new(config.seed)) else {
        return;
    };
    let test = synthetic_cases(10_000);

    c.bench_function("score_10k_cases", |b| {
        b.iter(|| {
            let mut predictor = Predictor::new(&outcome.rules);
            black_box(predictor.score_all(black_box(&test)))
        });
    });
}

criterion_group!(benches, bench_learn, bench_score);
criterion_main!(benches);
