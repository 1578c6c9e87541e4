// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing placed records through a host-provided painter.
//!
//! The engine never owns a drawing surface. Hosts implement [`Painter`] for
//! their canvas and [`SpriteSource`] for their image cache; [`paint_layer`]
//! decides what goes where.
//!
//! Sprites load asynchronously on most hosts. Nothing is drawn until the
//! source reports [`is_ready`](SpriteSource::is_ready), and a category whose
//! sprite failed to load is drawn with simple shapes instead.

use std::collections::BTreeMap;

use kurbo::{Circle, Point, Rect};

use crate::record::PlacementRecord;
use garden_terrain::Layer;

/// An sRGB color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Tree trunk.
    pub const BARK: Self = Self(0x8b, 0x5a, 0x2b);
    /// Tree crown.
    pub const LEAF: Self = Self(0x19, 0x7b, 0x2e);
    /// Star glow.
    pub const STARLIGHT: Self = Self(0xff, 0xff, 0xe0);
}

/// A filled shape used when a record has no sprite.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FallbackShape {
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Circle.
    Circle(Circle),
}

/// Drawing surface supplied by the host.
pub trait Painter {
    /// Draw the sprite for `category` stretched over `rect`.
    fn draw_sprite(&mut self, category: &str, rect: Rect, alpha: f64);

    /// Fill `shape` with `color`.
    fn fill(&mut self, shape: FallbackShape, color: Rgb, alpha: f64);
}

/// Sprite availability supplied by the host.
pub trait SpriteSource {
    /// Whether preloading has settled; nothing is painted before this.
    fn is_ready(&self) -> bool;

    /// Whether a sprite for `category` loaded successfully.
    fn has_sprite(&self, category: &str) -> bool;
}

/// Load state of one sprite.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SpriteState {
    Pending,
    Loaded,
    Failed,
}

/// A [`SpriteSource`] that tracks a fixed set of expected categories.
///
/// Ready once every expected sprite has either loaded or failed; a failure
/// does not hold up the rest of the scene.
#[derive(Clone, Debug, Default)]
pub struct SpriteSet {
    sprites: BTreeMap<String, SpriteState>,
}

impl SpriteSet {
    /// Expect sprites for `categories`.
    pub fn expecting<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sprites: categories
                .into_iter()
                .map(|c| (c.into(), SpriteState::Pending))
                .collect(),
        }
    }

    /// Mark `category` as loaded, adding it if it was not expected.
    pub fn mark_loaded(&mut self, category: &str) {
        self.sprites.insert(category.to_owned(), SpriteState::Loaded);
    }

    /// Mark `category` as failed; its records will use fallback shapes.
    pub fn mark_failed(&mut self, category: &str) {
        log::warn!("sprite `{category}` failed to load, using fallback shapes");
        self.sprites.insert(category.to_owned(), SpriteState::Failed);
    }

    /// Number of sprites still loading.
    pub fn pending(&self) -> usize {
        self.sprites
            .values()
            .filter(|s| **s == SpriteState::Pending)
            .count()
    }
}

impl SpriteSource for SpriteSet {
    fn is_ready(&self) -> bool {
        self.pending() == 0
    }

    fn has_sprite(&self, category: &str) -> bool {
        self.sprites.get(category) == Some(&SpriteState::Loaded)
    }
}

/// Twinkle opacity of a sky record at `time_ms`.
pub fn twinkle_alpha(id: u64, time_ms: f64) -> f64 {
    0.8 + 0.12 * (time_ms * 0.006 + id as f64).sin()
}

/// Shapes drawn for `record` when its sprite is missing.
///
/// Ground records get a trunk and a round crown standing on the foot; sky
/// records get a small dot in the middle of the footprint.
pub fn fallback_shapes(record: &PlacementRecord) -> Vec<(FallbackShape, Rgb)> {
    let x = record.x;
    match record.layer {
        Layer::Ground => {
            let foot = record.draw_y();
            vec![
                (
                    FallbackShape::Rect(Rect::new(x - 4.0, foot - 18.0, x + 4.0, foot)),
                    Rgb::BARK,
                ),
                (
                    FallbackShape::Circle(Circle::new(Point::new(x, foot - 24.0), 18.0)),
                    Rgb::LEAF,
                ),
            ]
        }
        Layer::Sky => {
            let center = record.footprint().center();
            vec![(
                FallbackShape::Circle(Circle::new(Point::new(x, center.y), 1.8)),
                Rgb::STARLIGHT,
            )]
        }
    }
}

/// Paint `records` in order and return how many were drawn.
///
/// Sky records twinkle with [`twinkle_alpha`]; ground records are opaque.
/// Returns `0` without drawing while `sprites` is not ready.
pub fn paint_layer(
    records: &[PlacementRecord],
    sprites: &impl SpriteSource,
    painter: &mut impl Painter,
    time_ms: f64,
) -> usize {
    if !sprites.is_ready() {
        return 0;
    }
    for r in records {
        let alpha = match r.layer {
            Layer::Sky => twinkle_alpha(r.id, time_ms),
            Layer::Ground => 1.0,
        };
        if sprites.has_sprite(&r.category) {
            painter.draw_sprite(&r.category, r.footprint(), alpha);
        } else {
            for (shape, color) in fallback_shapes(r) {
                painter.fill(shape, color, alpha);
            }
        }
    }
    records.len()
}
