// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tooltips.
//!
//! Sweep a pointer across the scene, hit-test each position, and turn the
//! results into tooltip show/hide events. Painting goes through a painter
//! that just logs what it would draw, with one sprite failing to load.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p garden_demos --example hover_tooltips`

use garden_placement::{
    Achievement, FallbackShape, HoverEvent, HoverState, Layer, Layers, Painter, PlacementConfig,
    Rgb, Scene, SpriteSet,
};
use garden_terrain::Viewport;
use kurbo::{Point, Rect};

#[derive(Default)]
struct LogPainter {
    sprites: usize,
    shapes: usize,
}

impl Painter for LogPainter {
    fn draw_sprite(&mut self, category: &str, rect: Rect, alpha: f64) {
        log::debug!("sprite {category} at {rect:?} alpha {alpha:.2}");
        self.sprites += 1;
    }

    fn fill(&mut self, shape: FallbackShape, color: Rgb, alpha: f64) {
        log::debug!("fill {shape:?} with {color:?} alpha {alpha:.2}");
        self.shapes += 1;
    }
}

fn main() {
    env_logger::init();

    let mut scene = Scene::with_default_regions(Viewport::new(1200, 800), PlacementConfig::default());
    scene.set_achievements(
        (1..=10)
            .map(|id| {
                let layer = if id % 2 == 0 { Layer::Sky } else { Layer::Ground };
                Achievement::new(id, layer)
                    .with_title(format!("Achievement {id}"))
                    .with_description("Unlocked by doing the thing.")
            })
            .collect(),
    );

    // Sweep along the ground row of the middle tree.
    let snapshot = scene.snapshot();
    let row = snapshot
        .ground
        .get(snapshot.ground.len() / 2)
        .map_or(600.0, |r| r.footprint().center().y);

    let mut hover = HoverState::new();
    for step in 0..=120 {
        let pt = Point::new(f64::from(step) * 10.0, row);
        let hit = scene.hit_test(pt, Layers::default()).map(|r| r.id);
        for event in hover.update(hit) {
            match event {
                HoverEvent::Enter(id) => {
                    if let Some(a) = scene.achievement(id) {
                        println!("show tooltip at x={:>6.1}: {}", pt.x, a.title);
                    }
                }
                HoverEvent::Leave(id) => println!("hide tooltip for #{id}"),
            }
        }
    }
    for event in hover.clear() {
        println!("pointer left the canvas: {event:?}");
    }

    // One frame of painting once the sprites have settled.
    let mut sprites = SpriteSet::expecting(["tree", "tree2", "tree3", "star"]);
    for c in ["tree", "tree3", "star"] {
        sprites.mark_loaded(c);
    }
    sprites.mark_failed("tree2");

    let mut painter = LogPainter::default();
    let token = scene.request_frame();
    let drawn = scene.paint(token, &sprites, &mut painter, 0.0);
    log::info!(
        "drew {drawn} records: {} sprites, {} fallback shapes",
        painter.sprites,
        painter.shapes
    );
}
