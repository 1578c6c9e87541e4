// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use garden_placement::{
    Achievement, Layer, Layers, PlacementConfig, Strategy, hit_test_layers, place,
};
use garden_terrain::{Terrain, Viewport, default_regions};
use kurbo::Point;

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

/// Two ground achievements for every sky one, as in a typical profile.
fn achievements(n: usize) -> Vec<Achievement> {
    (0..n as u64)
        .map(|id| {
            let layer = if id % 3 == 2 { Layer::Sky } else { Layer::Ground };
            Achievement::new(id + 1, layer)
        })
        .collect()
}

fn bench_place(c: &mut Criterion) {
    let regions = default_regions().unwrap();
    let viewport = Viewport::new(1200, 800);
    for (name, strategy) in [("spread", Strategy::Spread), ("scatter", Strategy::Scatter)] {
        let config = PlacementConfig {
            strategy,
            ..PlacementConfig::default()
        };
        let mut group = c.benchmark_group(format!("place_{name}"));
        for &n in &[10usize, 50, 200] {
            let list = achievements(n);
            group.throughput(Throughput::Elements(n as u64));
            // Cold: includes building the terrain and filling the column memo.
            group.bench_function(format!("cold_n{n}"), |b| {
                b.iter(|| {
                    let terrain = Terrain::new(&regions, viewport);
                    black_box(place(&list, &config, &terrain, None))
                });
            });
            group.bench_function(format!("warm_n{n}"), |b| {
                let terrain = Terrain::new(&regions, viewport);
                let _ = place(&list, &config, &terrain, None);
                b.iter(|| black_box(place(&list, &config, &terrain, None)));
            });
        }
        group.finish();
    }
}

fn bench_hit_test(c: &mut Criterion) {
    let regions = default_regions().unwrap();
    let viewport = Viewport::new(1200, 800);
    let terrain = Terrain::new(&regions, viewport);
    let config = PlacementConfig::default();
    let mut group = c.benchmark_group("hit_test");
    for &n in &[50usize, 200] {
        let placement = place(&achievements(n), &config, &terrain, None);
        let mut rng = Rng::new(0xC0FFEE);
        let points: Vec<Point> = (0..1024)
            .map(|_| Point::new(rng.next_f64() * 1200.0, rng.next_f64() * 800.0))
            .collect();
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("random_points_n{n}"), |b| {
            b.iter_batched(
                || points.clone(),
                |pts| {
                    let hits = pts
                        .iter()
                        .filter(|&&pt| hit_test_layers(&placement, pt, Layers::default()).is_some())
                        .count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_place, bench_hit_test);
criterion_main!(benches);
