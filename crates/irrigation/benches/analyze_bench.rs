//! Criterion benchmarks for the full analysis pipeline on random layouts.
//! Grid sizes: 1×1, 2×4, 4×8, 8×8 plots.
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use irrigation::cfg::EngineCfg;
use irrigation::fittings::count_fittings;
use irrigation::layout::{draw_layout, GridSize, LayoutCfg, ReplayToken};
use irrigation::report::analyze;

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let engine = EngineCfg::default();
    for &(rows, cols) in &[(1usize, 1usize), (2, 4), (4, 8), (8, 8)] {
        let cfg = LayoutCfg {
            rows: GridSize::Fixed(rows),
            cols: GridSize::Fixed(cols),
            ..LayoutCfg::default()
        };
        let snap = draw_layout(cfg, ReplayToken { seed: 7, index: 0 });
        let label = format!("{rows}x{cols}");

        group.bench_with_input(BenchmarkId::new("report", &label), &snap, |b, snap| {
            b.iter(|| analyze(snap, &engine))
        });
        group.bench_with_input(BenchmarkId::new("fittings", &label), &snap, |b, snap| {
            b.iter(|| count_fittings(snap, &engine.proximity))
        });
    }
    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let cfg = LayoutCfg::default();
    let mut index = 0u64;
    group.bench_function("draw_layout", |b| {
        b.iter(|| {
            index = index.wrapping_add(1);
            draw_layout(cfg, ReplayToken { seed: 11, index })
        })
    });
    group.finish();
}

criterion_group!(benches, bench_analyze, bench_draw);
criterion_main!(benches);
