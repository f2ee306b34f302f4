//! Criterion benchmarks for the parse pipeline.

use chatlens::ChatParser;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

/// Builds a synthetic export with `n` entries, one in five multi-line.
fn synthetic_export(n: usize) -> String {
    let mut out = String::with_capacity(n * 64);
    for i in 0..n {
        let day = (i % 28) + 1;
        let month = (i % 12) + 1;
        let hour = i % 24;
        let minute = i % 60;
        out.push_str(&format!(
            "{day}/{month}/23, {hour}:{minute:02} - Sender{}: message number {i}\n",
            i % 8
        ));
        if i % 5 == 0 {
            out.push_str("a continuation line for the previous message\n");
        }
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let parser = ChatParser::new();

    for size in [1_000, 10_000] {
        let export = synthetic_export(size);
        c.bench_function(&format!("parse_{size}_entries"), |b| {
            b.iter(|| parser.parse_str(black_box(&export)));
        });
    }
}

fn bench_segment(c: &mut Criterion) {
    let export = synthetic_export(10_000);
    c.bench_function("segment_10000_entries", |b| {
        b.iter(|| chatlens::segment::segment(black_box(&export)));
    });
}

fn bench_stats(c: &mut Criterion) {
    use chatlens::UserSelection;

    let table = ChatParser::new().parse_str(&synthetic_export(10_000));
    let selection = UserSelection::Overall;

    c.bench_function("summary_10000_rows", |b| {
        b.iter(|| chatlens::stats::summary(black_box(&selection), black_box(&table)));
    });
    c.bench_function("heatmap_10000_rows", |b| {
        b.iter(|| chatlens::stats::activity_heatmap(black_box(&selection), black_box(&table)));
    });
}

criterion_group!(benches, bench_parse, bench_segment, bench_stats);
criterion_main!(benches);
