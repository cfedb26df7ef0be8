//! Criterion benchmarks for bin filtering.
//!
//! Benchmarks:
//!   - visible_bins over the Nairobi seed set (all / one / two categories)
//!   - visible_bins over 10K seeded random bins
//!   - toggle_category across every filter option
//!
//! Run with: cargo bench -p locator --bench filter_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use locator::bins::{Bin, BinRegistry, BinStatus, WasteCategory};
use locator::config::DEFAULT_CENTER;
use locator::filter::{toggle_category, visible_bins, FilterOption, FilterSelection};

fn random_bins(count: usize, seed: u64) -> Vec<Bin> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let categories: Vec<_> = WasteCategory::all()
                .iter()
                .copied()
                .filter(|_| rng.gen_bool(0.4))
                .collect();
            let categories = if categories.is_empty() {
                vec![WasteCategory::Plastic]
            } else {
                categories
            };
            let status = BinStatus::all()[rng.gen_range(0..BinStatus::all().len())];
            let position = DEFAULT_CENTER.offset_m(
                rng.gen_range(-3000.0..3000.0),
                rng.gen_range(-3000.0..3000.0),
            );
            Bin::new(format!("bin-r{i:05}"), format!("Bin {i}"), position, status, categories)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Benchmark: visible_bins
// ---------------------------------------------------------------------------

fn bench_visible_bins(c: &mut Criterion) {
    let mut group = c.benchmark_group("visible_bins");

    let seed = BinRegistry::nairobi().expect("seed registry is valid");
    let all = FilterSelection::all();
    let plastic = FilterSelection::only([WasteCategory::Plastic]);
    let two = FilterSelection::only([WasteCategory::Metal, WasteCategory::EWaste]);

    group.bench_function("seed_all", |b| {
        b.iter(|| black_box(visible_bins(black_box(seed.bins()), &all)));
    });
    group.bench_function("seed_plastic", |b| {
        b.iter(|| black_box(visible_bins(black_box(seed.bins()), &plastic)));
    });
    group.bench_function("seed_metal_ewaste", |b| {
        b.iter(|| black_box(visible_bins(black_box(seed.bins()), &two)));
    });

    let large = random_bins(10_000, 7);
    group.bench_function("random_10k_plastic", |b| {
        b.iter(|| black_box(visible_bins(black_box(&large), &plastic)));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: toggle_category
// ---------------------------------------------------------------------------

fn bench_toggle(c: &mut Criterion) {
    c.bench_function("toggle_every_option", |b| {
        b.iter(|| {
            let mut selection = FilterSelection::all();
            for option in FilterOption::all_options() {
                selection = toggle_category(&selection, option);
            }
            black_box(selection)
        });
    });
}

criterion_group!(benches, bench_visible_bins, bench_toggle);
criterion_main!(benches);
