// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use status_context_core::{StatusEntry, StatusReporter, parse_porcelain};

/// Porcelain text with a handful of source edits buried under dependency noise
fn noisy_status(untracked: usize) -> String {
    let mut text = String::from("M  src/main.rs\n M src/lib.rs\nA  src/new.rs\nM  Cargo.lock\n");
    for i in 0..untracked {
        text.push_str(&format!("?? node_modules/pkg{}/file{i}.js\n", i % 50));
    }
    text
}

fn parse_benchmarks(c: &mut Criterion) {
    let text = noisy_status(10_000);
    c.bench_function("parse_porcelain_10k", |b| {
        b.iter(|| parse_porcelain(std::hint::black_box(&text)))
    });
}

fn budget_benchmarks(c: &mut Criterion) {
    let reporter = StatusReporter::default();
    let mut group = c.benchmark_group("render_status");

    for size in [100usize, 1_000, 10_000] {
        let entries: Vec<StatusEntry> = parse_porcelain(&noisy_status(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| reporter.render_status(std::hint::black_box(entries)))
        });
    }

    group.finish();
}

fn classifier_benchmarks(c: &mut Criterion) {
    c.bench_function("build_reporter", |b| b.iter(StatusReporter::default));
}

criterion_group!(
    benches,
    parse_benchmarks,
    budget_benchmarks,
    classifier_benchmarks
);
criterion_main!(benches);
