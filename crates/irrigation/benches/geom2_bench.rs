//! Criterion benchmarks for the planar kernel.
//! Focus sizes: n in {4, 16, 64, 256} vertices.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use irrigation::geom2::{
    distance_point_to_polygon, point_in_polygon, polygon_area, polyline_intersections,
    station_along_polyline, Point,
};
use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Star-shaped polygon around (500, 500) with jittered radii.
fn random_polygon(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|k| {
            let theta = k as f64 / n as f64 * std::f64::consts::TAU;
            let r = rng.gen_range(200.0f64..400.0);
            Vector2::new(500.0 + r * theta.cos(), 500.0 + r * theta.sin())
        })
        .collect()
}

fn random_polyline(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Vector2::new(rng.gen_range(0.0f64..1000.0), rng.gen_range(0.0f64..1000.0)))
        .collect()
}

fn bench_geom2(c: &mut Criterion) {
    let mut group = c.benchmark_group("geom2");
    for &n in &[4usize, 16, 64, 256] {
        let poly = random_polygon(n, 41);
        let line = random_polyline(n, 42);
        let query = Vector2::new(512.0, 488.0);

        group.bench_with_input(BenchmarkId::new("point_in_polygon", n), &poly, |b, poly| {
            b.iter(|| point_in_polygon(query, poly))
        });
        group.bench_with_input(BenchmarkId::new("distance_to_polygon", n), &poly, |b, poly| {
            b.iter(|| distance_point_to_polygon(query, poly))
        });
        group.bench_with_input(BenchmarkId::new("polygon_area", n), &poly, |b, poly| {
            b.iter(|| polygon_area(poly))
        });
        group.bench_with_input(BenchmarkId::new("station", n), &line, |b, line| {
            b.iter(|| station_along_polyline(line, query))
        });
        group.bench_with_input(BenchmarkId::new("intersections", n), &n, |b, &n| {
            b.iter_batched(
                || (random_polyline(n, 43), random_polyline(n, 44)),
                |(p, q)| polyline_intersections(&p, &q),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_geom2);
criterion_main!(benches);
