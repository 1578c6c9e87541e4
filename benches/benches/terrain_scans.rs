// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use garden_terrain::{
    Containment, ExactOutline, FlattenedOutline, Region, TerrainGeneric, TerrainGrid, Viewport,
    default_regions,
};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

const VIEWPORTS: [Viewport; 3] = [
    Viewport::new(640, 480),
    Viewport::new(1200, 800),
    Viewport::new(2560, 1440),
];

fn random_points(n: usize, viewport: Viewport, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = Rng::new(seed);
    let (w, h) = (f64::from(viewport.width()), f64::from(viewport.height()));
    (0..n)
        .map(|_| (rng.next_f64() * w, rng.next_f64() * h))
        .collect()
}

fn surface_sweep<C: Containment>(regions: &[Region], viewport: Viewport) -> f64 {
    let terrain = TerrainGeneric::<C>::new(regions, viewport);
    let mut acc = 0.0;
    for x in 0..viewport.width() {
        acc += terrain.ground_surface_y(f64::from(x));
    }
    acc
}

fn bench_surface(c: &mut Criterion) {
    let regions = default_regions().unwrap();
    let mut group = c.benchmark_group("surface_sweep");
    for viewport in VIEWPORTS {
        group.throughput(Throughput::Elements(u64::from(viewport.width())));
        let label = format!("{}x{}", viewport.width(), viewport.height());
        group.bench_function(format!("exact_{label}"), |b| {
            b.iter(|| black_box(surface_sweep::<ExactOutline>(&regions, viewport)));
        });
        group.bench_function(format!("flattened_{label}"), |b| {
            b.iter(|| black_box(surface_sweep::<FlattenedOutline>(&regions, viewport)));
        });
    }
    group.finish();
}

fn bench_memoized(c: &mut Criterion) {
    let regions = default_regions().unwrap();
    let viewport = Viewport::new(1200, 800);
    let mut group = c.benchmark_group("surface_memoized");
    group.throughput(Throughput::Elements(u64::from(viewport.width())));
    group.bench_function("warm_1200x800", |b| {
        let terrain = TerrainGeneric::<ExactOutline>::new(&regions, viewport);
        let _ = terrain.height_map();
        b.iter(|| {
            let mut acc = 0.0;
            for x in 0..viewport.width() {
                acc += terrain.ground_surface_y(f64::from(x));
            }
            black_box(acc);
        });
    });
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let regions = default_regions().unwrap();
    let viewport = Viewport::new(1200, 800);
    let points = random_points(4096, viewport, 0x5eed);
    let exact = TerrainGeneric::<ExactOutline>::new(&regions, viewport);
    let flat = TerrainGeneric::<FlattenedOutline>::new(&regions, viewport);
    let mut group = c.benchmark_group("classify");
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("exact_is_sky", |b| {
        b.iter(|| {
            let sky = points.iter().filter(|&&(x, y)| exact.is_sky(x, y)).count();
            black_box(sky);
        });
    });
    group.bench_function("flattened_is_sky", |b| {
        b.iter(|| {
            let sky = points.iter().filter(|&&(x, y)| flat.is_sky(x, y)).count();
            black_box(sky);
        });
    });
    group.finish();
}

fn bench_grid(c: &mut Criterion) {
    let regions = default_regions().unwrap();
    let viewport = Viewport::new(1200, 800);
    let mut group = c.benchmark_group("grid");
    group.bench_function("from_terrain_48x32", |b| {
        b.iter_batched(
            || TerrainGeneric::<ExactOutline>::new(&regions, viewport),
            |terrain| black_box(TerrainGrid::from_terrain(&terrain, 48, 32)),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_surface, bench_memoized, bench_classify, bench_grid);
criterion_main!(benches);
