mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec2;
use radio_sky::distort::{ElasticDistortion, TileDistortion};
use radio_sky::profile::{GaussianProfile, ProfileRenderer, ProfileShape, SersicProfile};
use rand::rngs::StdRng;
use rand::SeedableRng;

const TILE_SIZES: [usize; 3] = [64, 128, 250];

fn shape_for(tile_size: usize) -> ProfileShape {
    let c = (tile_size / 2) as f64;
    ProfileShape::new(DVec2::new(c, c), 6.0)
        .with_sigmas(8.0, 4.0)
        .with_rotation(30.0)
        .with_amplitude(2.5)
}

fn render_profile_benches(c: &mut Criterion) {
    let renderers: [(&str, Box<dyn ProfileRenderer>); 2] = [
        ("gaussian", Box::new(GaussianProfile)),
        ("sersic", Box::new(SersicProfile::default())),
    ];

    for (name, renderer) in &renderers {
        let mut group = c.benchmark_group(format!("render/{name}"));
        for &size in &TILE_SIZES {
            let shape = shape_for(size);
            group.throughput(common::pixels_throughput(size));
            group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
                b.iter(|| {
                    let tile = renderer.render(black_box(&shape), size);
                    black_box(tile.peak());
                });
            });
        }
        group.finish();
    }
}

fn distort_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/elastic_distortion");
    let warp = ElasticDistortion::new(20.0);

    for &size in &TILE_SIZES {
        let tile = GaussianProfile.render(&shape_for(size), size);
        let mut rng = StdRng::seed_from_u64(0xD157 ^ size as u64);
        group.throughput(common::pixels_throughput(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let out = warp.distort(black_box(&tile), &mut rng);
                black_box(out.total_flux());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = render_profile_benches, distort_benches
}
criterion_main!(benches);
