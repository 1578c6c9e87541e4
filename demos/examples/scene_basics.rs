// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene basics.
//!
//! Place a handful of achievements, print where they landed, then resize and
//! watch the whole scene recompute against the new terrain.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p garden_demos --example scene_basics`

use garden_placement::{Achievement, Layer, PlacementConfig, Placement, Scene};
use garden_terrain::Viewport;

fn print_layer(name: &str, placement: &Placement, layer: Layer) {
    println!("{name}:");
    for r in placement.layer(layer) {
        println!(
            "  #{:<3} {:<6} x={:>6.1} foot={:>6.1} nudge={}",
            r.id, r.category, r.x, r.y, r.nudge
        );
    }
}

fn main() {
    env_logger::init();

    let mut scene = Scene::with_default_regions(Viewport::new(1200, 800), PlacementConfig::default());
    let mut list: Vec<Achievement> = (1..=8)
        .map(|id| Achievement::new(id, Layer::Ground).with_title(format!("Milestone {id}")))
        .collect();
    list.extend((9..=14).map(|id| Achievement::new(id, Layer::Sky)));
    scene.set_achievements(list);

    let first = scene.snapshot();
    print_layer("ground", &first, Layer::Ground);
    print_layer("sky", &first, Layer::Sky);

    // Every tree stands on the contour.
    for r in &first.ground {
        assert_eq!(r.y, scene.terrain().ground_surface_y(r.x));
    }

    let token = scene.request_frame();
    scene.resize(Viewport::new(800, 600));
    assert!(!scene.is_frame_live(token), "resize should cancel stale frames");

    let second = scene.snapshot();
    println!("after resize to {:?}:", second.viewport);
    print_layer("ground", &second, Layer::Ground);

    // The old snapshot is untouched.
    assert_eq!(first.viewport, Viewport::new(1200, 800));
}
