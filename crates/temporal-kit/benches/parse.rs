//! Benchmarks for the format-detecting parser and the comparator.

use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};

use temporal_kit::{parse, parse_date, parse_time, sort_asc};

fn bench_parse_iso(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_iso");
    for input in [
        "2025-11-30",
        "2025-11-30T15:30:00",
        "2025-11-30T15:30:00Z",
        "2025-11-30T15:30:00+01:00[Europe/Berlin]",
    ] {
        group.bench_function(input, |b| b.iter(|| parse(black_box(input))));
    }
    group.finish();
}

fn bench_parse_common_formats(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_common");
    for input in ["30.11.2025", "11/30/2025", "3:30 PM", "30.11.2025 15:30"] {
        group.bench_function(input, |b| b.iter(|| parse(black_box(input))));
    }
    group.finish();
}

fn bench_parse_failure(c: &mut Criterion) {
    // Exhausts every recognizer.
    c.bench_function("parse_unparsable", |b| {
        b.iter(|| parse(black_box("definitely not a date")))
    });
}

fn bench_specialized(c: &mut Criterion) {
    c.bench_function("parse_date_european", |b| {
        b.iter(|| parse_date(black_box("30.11.2025")))
    });
    c.bench_function("parse_time_twelve_hour", |b| {
        b.iter(|| parse_time(black_box("11:45:10 pm")))
    });
}

fn bench_sort(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let dates: Vec<NaiveDate> = (0..1_000u64)
        .map(|i| start + chrono::Days::new((i * 7_919) % 3_650))
        .collect();

    c.bench_function("sort_asc_1000_dates", |b| {
        b.iter(|| sort_asc(black_box(&dates)))
    });
}

criterion_group!(
    benches,
    bench_parse_iso,
    bench_parse_common_formats,
    bench_parse_failure,
    bench_specialized,
    bench_sort,
);
criterion_main!(benches);
