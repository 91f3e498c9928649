//! Benchmarks for expression and sheet evaluation.
//!
//! Run with: cargo bench --bench eval_benchmarks

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::fs;
use tally::domain::{EvalMode, NumberFormat, Sheet, evaluate, parse_line_with_mode};
use tally::infra::scan_calc_notes;
use tempfile::TempDir;

// =============================================================================
// Test Data Generation
// =============================================================================

/// Line shapes cycled through when generating notes
const LINES: &[&str] = &[
    "Rent: 1,450",
    "Groceries: 320 + 85.50 + 42",
    "Phone: 45 * 12 / 12",
    "Tip: 15% * 80",
    "Shared: (1200 + 300) / 3",
    "Notes about this month",
    "Coffee with Sam 4.75",
    "Refund: -(20 - 5)",
];

/// Generate a note with the given number of lines
fn generate_note(lines: usize) -> String {
    (0..lines)
        .map(|i| LINES[i % LINES.len()])
        .collect::<Vec<_>>()
        .join("\n")
}

/// Create a temporary directory with N notes
fn create_test_notes(count: usize) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for i in 0..count {
        let sub = dir.path().join(format!("year-{}", i % 5));
        fs::create_dir_all(&sub).expect("Failed to create subdirectory");
        fs::write(sub.join(format!("note-{}.calc", i)), generate_note(20))
            .expect("Failed to write note");
    }
    dir
}

// =============================================================================
// Evaluation Benchmarks
// =============================================================================

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    group.bench_function("literal", |b| b.iter(|| evaluate("1,234.56").unwrap()));
    group.bench_function("arithmetic", |b| {
        b.iter(|| evaluate("(1200 + 300) / 3 - 15% * 80").unwrap())
    });

    let nested = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    group.bench_function("deeply_nested", |b| b.iter(|| evaluate(&nested).unwrap()));

    group.finish();
}

fn bench_parse_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_line");

    for mode in [EvalMode::Strict, EvalMode::Heuristic] {
        group.bench_with_input(BenchmarkId::new("mixed", mode), &mode, |b, &mode| {
            b.iter(|| {
                for line in LINES {
                    let _ = parse_line_with_mode(line, mode);
                }
            })
        });
    }

    group.finish();
}

fn bench_sheet(c: &mut Criterion) {
    let mut group = c.benchmark_group("sheet");

    for size in [100, 1000, 10000] {
        let text = generate_note(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("lines", size), &size, |b, _| {
            b.iter(|| Sheet::from_text(&text, EvalMode::Strict).total())
        });
    }

    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let format = NumberFormat::default();

    c.bench_function("format_number", |b| {
        b.iter(|| format.format(-1_234_567.891))
    });
}

// =============================================================================
// Discovery Benchmarks
// =============================================================================

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_calc_notes");

    for size in [100, 500] {
        let dir = create_test_notes(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("notes", size), &size, |b, _| {
            b.iter(|| scan_calc_notes(dir.path(), "calc").unwrap())
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Groups
// =============================================================================

criterion_group!(
    eval_benches,
    bench_evaluate,
    bench_parse_line,
    bench_sheet,
    bench_format,
);

criterion_group!(discovery_benches, bench_scan);

criterion_main!(eval_benches, discovery_benches);
