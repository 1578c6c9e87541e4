// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement tuning knobs.

use garden_terrain::Layer;

/// How positions are chosen before correction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Even left-to-right spread with seeded jitter.
    #[default]
    Spread,
    /// Seeded rejection sampling with a bounded number of attempts, keeping
    /// previous positions that are still valid.
    Scatter,
}

/// A sprite key and where its foot sits.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    /// Sprite key.
    pub key: String,
    /// Fraction of the footprint height above the foot for this sprite.
    pub anchor: f64,
}

impl Category {
    /// Create a category.
    pub fn new(key: impl Into<String>, anchor: f64) -> Self {
        Self {
            key: key.into(),
            anchor,
        }
    }
}

/// Per-layer geometry and spacing.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerConfig {
    /// Horizontal padding from each viewport edge.
    pub padding: f64,
    /// Minimum horizontal distance between neighbours.
    pub min_spacing: f64,
    /// Total width of the horizontal jitter band.
    pub jitter: f64,
    /// Footprint width.
    pub width: f64,
    /// Footprint height.
    pub height: f64,
    /// Fraction of the height above the foot, for records without a category.
    pub anchor: f64,
}

impl LayerConfig {
    /// Stars in the sky.
    pub const SKY: Self = Self {
        padding: 50.0,
        min_spacing: 24.0,
        jitter: 60.0,
        width: 6.0,
        height: 6.0,
        anchor: 0.98,
    };

    /// Trees on the ground.
    pub const GROUND: Self = Self {
        padding: 40.0,
        min_spacing: 20.0,
        jitter: 60.0,
        width: 90.0,
        height: 95.0,
        anchor: 0.9,
    };
}

/// Configuration for a placement pass.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PlacementConfig {
    /// Sky layer geometry.
    pub sky: LayerConfig,
    /// Ground layer geometry.
    pub ground: LayerConfig,
    /// Clearance between a sky element and the ground surface below it.
    pub sky_margin: f64,
    /// Absolute minimum row for sky elements.
    pub sky_min_y: f64,
    /// Padding from the top edge for sky elements.
    pub sky_top_padding: f64,
    /// Largest downward nudge applied when decluttering a pair.
    pub max_vertical_nudge: f64,
    /// Overlap, on both axes, above which a pair is decluttered.
    pub overlap_threshold: f64,
    /// Rejection-sampling budget per item for [`Strategy::Scatter`].
    pub max_attempts: u32,
    /// Position selection strategy.
    pub strategy: Strategy,
    /// Sprite for sky records.
    pub sky_category: Category,
    /// Sprites cycled over ground records by index.
    pub ground_categories: Vec<Category>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            sky: LayerConfig::SKY,
            ground: LayerConfig::GROUND,
            sky_margin: 28.0,
            sky_min_y: 8.0,
            sky_top_padding: 60.0,
            max_vertical_nudge: 5.0,
            overlap_threshold: 10.0,
            max_attempts: 200,
            strategy: Strategy::Spread,
            sky_category: Category::new("star", 0.98),
            ground_categories: vec![
                Category::new("tree", 0.88),
                Category::new("tree2", 0.9),
                Category::new("tree3", 0.87),
            ],
        }
    }
}

impl PlacementConfig {
    /// Geometry for `layer`.
    pub fn layer(&self, layer: Layer) -> &LayerConfig {
        match layer {
            Layer::Sky => &self.sky,
            Layer::Ground => &self.ground,
        }
    }

    /// Highest row a sky element may occupy: `max(sky_min_y, sky_top_padding)`.
    pub fn sky_floor(&self) -> f64 {
        self.sky_min_y.max(self.sky_top_padding)
    }

    /// Sprite for the `index`-th record of `layer`, if the layer has any.
    pub fn category(&self, layer: Layer, index: usize) -> Option<&Category> {
        match layer {
            Layer::Sky => Some(&self.sky_category),
            Layer::Ground => {
                if self.ground_categories.is_empty() {
                    return None;
                }
                self.ground_categories.get(index % self.ground_categories.len())
            }
        }
    }

    /// Sprite key and anchor for the `index`-th record of `layer`.
    ///
    /// Without a category the key is empty and the layer's anchor applies.
    pub fn sprite(&self, layer: Layer, index: usize) -> (String, f64) {
        match self.category(layer, index) {
            Some(c) => (c.key.clone(), c.anchor),
            None => (String::new(), self.layer(layer).anchor),
        }
    }
}
