//! Criterion benchmarks for board hot paths.
//!
//! Benchmarks:
//! 1. View derivation (filter + sort) over large boards
//! 2. Tick application over large boards

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tickerboard_core::domain::{Sector, Security};
use tickerboard_core::filter::SectorFilter;
use tickerboard_core::generator::generate_record;
use tickerboard_core::tick::advance;
use tickerboard_core::{Board, SortDirection, SortField, SortSpec, StockRecord, TickParams};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_records(n: usize) -> Vec<StockRecord> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|i| {
            let security = Security::new(
                &format!("SYM{i:05}"),
                &format!("Security {i}"),
                Sector::ALL[i % Sector::ALL.len()],
            );
            generate_record(&security, 20, &mut rng)
        })
        .collect()
}

// ── 1. View ──────────────────────────────────────────────────────────

fn bench_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_view");

    for &count in &[100, 1_000, 10_000] {
        let mut board = Board::with_records(make_records(count));
        board.set_sort(SortSpec::new(SortField::PercentChange, SortDirection::Descending));

        group.bench_with_input(BenchmarkId::new("sorted", count), &count, |b, _| {
            b.iter(|| black_box(board.view().len()));
        });

        board.set_search("1");
        board.set_sector(SectorFilter::Only(Sector::Energy));
        group.bench_with_input(BenchmarkId::new("filtered_sorted", count), &count, |b, _| {
            b.iter(|| black_box(board.view().len()));
        });
    }

    group.finish();
}

// ── 2. Tick ──────────────────────────────────────────────────────────

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_advance");
    let params = TickParams::default();

    for &count in &[100, 1_000, 10_000] {
        let records = make_records(count);
        let mut rng = StdRng::seed_from_u64(7);
        group.bench_with_input(BenchmarkId::new("advance", count), &count, |b, _| {
            b.iter(|| advance(black_box(&records), &params, &mut rng));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_view, bench_tick);
criterion_main!(benches);
