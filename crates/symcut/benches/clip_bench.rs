//! Criterion benchmarks for the clip kernel.
//! Sizes: vertex counts n in {4, 16, 64} for both operands.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use symcut::clip::cut_against;
use symcut::geom2::{polar, GeomCfg, Point2};
use symcut::polygon::Polygon;

/// Star-shaped polygon with `n` vertices and jittered radii (non-convex for n > 4).
fn random_star(n: usize, center: Point2, seed: u64) -> Polygon {
    let mut rng = StdRng::seed_from_u64(seed);
    let pts = (0..n)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / n as f64;
            center + polar(rng.gen_range(0.6..1.4), angle)
        })
        .collect();
    Polygon::new(pts)
}

fn bench_clip(c: &mut Criterion) {
    let cfg = GeomCfg::default();
    let mut group = c.benchmark_group("clip");
    for &n in &[4usize, 16, 64] {
        let subject = random_star(n, Point2::zeros(), 41);
        let cutter = random_star(n, Point2::new(0.5, 0.2), 42);
        group.bench_with_input(BenchmarkId::new("cut_against", n), &n, |b, _| {
            b.iter(|| cut_against(&subject, &cutter, &cfg))
        });
        group.bench_with_input(BenchmarkId::new("tesselate", n), &n, |b, _| {
            b.iter(|| {
                let mut p = subject.clone();
                p.tesselate_if_needed().map(|t| t.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_clip);
criterion_main!(benches);
