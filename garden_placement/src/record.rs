// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inputs and outputs of a placement pass.

use garden_terrain::{Layer, Viewport};
use kurbo::{Point, Rect};

/// An achievement to depict in the scene.
///
/// `id` seeds the placement and must be stable across passes; it should also
/// be unique, since hit results and previous-placement reuse are keyed by it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Achievement {
    /// Stable identifier.
    pub id: u64,
    /// Sky or ground.
    pub layer: Layer,
    /// Title shown in the tooltip.
    pub title: String,
    /// Optional tooltip body.
    pub description: Option<String>,
}

impl Achievement {
    /// Create an untitled achievement.
    pub fn new(id: u64, layer: Layer) -> Self {
        Self {
            id,
            layer,
            title: String::new(),
            description: None,
        }
    }

    /// Set the tooltip title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the tooltip body.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Where one achievement ended up.
///
/// `y` is always the foot: the point that rests on the ground contour for
/// ground records. The declutter pass never moves the foot; it records a
/// downward `nudge` that applies to drawing, hit testing, and depth order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementRecord {
    /// Achievement id.
    pub id: u64,
    /// Horizontal center in pixels.
    pub x: f64,
    /// Foot position in pixels.
    pub y: f64,
    /// Footprint width.
    pub width: f64,
    /// Footprint height.
    pub height: f64,
    /// Layer the record was placed on.
    pub layer: Layer,
    /// Fraction of `height` that sits above the foot.
    pub anchor: f64,
    /// Sprite key.
    pub category: String,
    /// Downward draw offset applied by the declutter pass.
    pub nudge: f64,
}

impl PlacementRecord {
    /// Vertical position used for drawing: the foot plus any nudge.
    pub fn draw_y(&self) -> f64 {
        self.y + self.nudge
    }

    /// Axis-aligned footprint:
    /// `[x - w/2, x + w/2] × [draw_y - h·anchor, draw_y - h·anchor + h]`.
    pub fn footprint(&self) -> Rect {
        let top = self.draw_y() - self.height * self.anchor;
        let half = self.width / 2.0;
        Rect::new(self.x - half, top, self.x + half, top + self.height)
    }

    /// Whether `pt` lies within the footprint, edges included.
    pub fn contains(&self, pt: Point) -> bool {
        let r = self.footprint();
        pt.x >= r.x0 && pt.x <= r.x1 && pt.y >= r.y0 && pt.y <= r.y1
    }

    /// Render-order key; records draw in ascending order.
    ///
    /// Ground records sort by their bottom edge, sky records by `y`.
    pub fn depth_key(&self) -> f64 {
        match self.layer {
            Layer::Ground => self.draw_y() + self.height,
            Layer::Sky => self.draw_y(),
        }
    }
}

/// The complete result of one placement pass.
///
/// Each layer is in draw order (back to front). A placement is never patched;
/// the next pass produces a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// Viewport the records were computed for.
    pub viewport: Viewport,
    /// Sky records in draw order.
    pub sky: Vec<PlacementRecord>,
    /// Ground records in draw order.
    pub ground: Vec<PlacementRecord>,
}

impl Placement {
    /// A placement with no records.
    pub fn empty(viewport: Viewport) -> Self {
        Self {
            viewport,
            sky: Vec::new(),
            ground: Vec::new(),
        }
    }

    /// Records of one layer in draw order.
    pub fn layer(&self, layer: Layer) -> &[PlacementRecord] {
        match layer {
            Layer::Sky => &self.sky,
            Layer::Ground => &self.ground,
        }
    }

    /// The record for `id`, if it was placed.
    pub fn find(&self, id: u64) -> Option<&PlacementRecord> {
        self.ground.iter().chain(&self.sky).find(|r| r.id == id)
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.sky.len() + self.ground.len()
    }

    /// Whether no records were placed.
    pub fn is_empty(&self) -> bool {
        self.sky.is_empty() && self.ground.is_empty()
    }
}
