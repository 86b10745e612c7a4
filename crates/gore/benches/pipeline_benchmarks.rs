//! Benchmarks for the gore pipeline.
//!
//! Run with: cargo bench --package gore --bench pipeline_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gore::{make_equatorial, make_rotary, InterpolationMethod, PipelineControl, ProjectionKind};
use projection::{EquirectExtent, GoreGeometry};
use test_utils::{gradient, six_gore_sinusoidal, uniform_disk, GRAY};

// =============================================================================
// EQUATORIAL PASS BENCHMARKS
// =============================================================================

fn bench_equatorial(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_equatorial");

    let source = gradient(1024, 512);
    let geometry = GoreGeometry::new(EquirectExtent::full_sphere(), 6)
        .unwrap()
        .with_alpha_limit(std::f64::consts::PI);

    group.throughput(Throughput::Elements(1024 * 512));
    for projection in ProjectionKind::ALL {
        group.bench_with_input(
            BenchmarkId::new(projection.as_str(), "1024x512"),
            &projection,
            |b, &projection| {
                b.iter(|| {
                    make_equatorial(
                        black_box(&source),
                        &geometry,
                        projection,
                        InterpolationMethod::Bilinear,
                    )
                })
            },
        );
    }

    group.finish();
}

// =============================================================================
// FULL PIPELINE BENCHMARKS
// =============================================================================

fn bench_make_rotary(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_rotary");
    group.sample_size(10);

    for size in [256u32, 512] {
        let disk = uniform_disk(size, GRAY);
        let params = six_gore_sinusoidal();
        group.bench_with_input(BenchmarkId::new("six_gores", size), &disk, |b, disk| {
            b.iter(|| make_rotary(black_box(disk), &params, &PipelineControl::none()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_equatorial, bench_make_rotary);
criterion_main!(benches);
