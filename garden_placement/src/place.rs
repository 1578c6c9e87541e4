// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The placement pass.
//!
//! A [`PlacementSession`] borrows a terrain and a configuration, owns the
//! bookkeeping for one pass (positions already taken per layer), and turns a
//! list of achievements into a fresh [`Placement`]. Nothing survives the
//! session; build a new one for every recomputation.

use garden_terrain::{Containment, Layer, TerrainGeneric};
use kurbo::Point;

use crate::config::{PlacementConfig, Strategy};
use crate::correct::correct_layer;
use crate::record::{Achievement, Placement, PlacementRecord};
use crate::seed::{JITTER_X, SKY_Y, sample_pair, seed_fraction};

/// Fixed sky position used when sampling runs out of attempts.
const SKY_FALLBACK_OFFSET_X: f64 = 50.0;
const SKY_FALLBACK_Y: f64 = 80.0;

/// State for one placement pass.
#[derive(Debug)]
pub struct PlacementSession<'a, C: Containment> {
    terrain: &'a TerrainGeneric<C>,
    config: &'a PlacementConfig,
    used_sky: Vec<Point>,
    used_ground: Vec<Point>,
}

impl<'a, C: Containment> PlacementSession<'a, C> {
    /// Start a pass over `terrain` with `config`.
    pub fn new(terrain: &'a TerrainGeneric<C>, config: &'a PlacementConfig) -> Self {
        Self {
            terrain,
            config,
            used_sky: Vec::new(),
            used_ground: Vec::new(),
        }
    }

    /// Place every achievement and return the corrected, depth-sorted result.
    ///
    /// `previous` is the last committed placement; [`Strategy::Scatter`] keeps
    /// positions from it that are still valid. [`Strategy::Spread`] positions
    /// are a pure function of list order and ids, so it ignores `previous`.
    pub fn place(&mut self, achievements: &[Achievement], previous: Option<&Placement>) -> Placement {
        let sky_items: Vec<&Achievement> =
            achievements.iter().filter(|a| a.layer == Layer::Sky).collect();
        let ground_items: Vec<&Achievement> =
            achievements.iter().filter(|a| a.layer == Layer::Ground).collect();

        let (mut sky, mut ground) = match self.config.strategy {
            Strategy::Spread => (self.spread_sky(&sky_items), self.spread_ground(&ground_items)),
            Strategy::Scatter => (
                self.scatter_sky(&sky_items, previous),
                self.scatter_ground(&ground_items, previous),
            ),
        };

        correct_layer(&mut sky, Layer::Sky, self.terrain, self.config);
        correct_layer(&mut ground, Layer::Ground, self.terrain, self.config);

        log::debug!(
            "placed {} of {} sky and {} of {} ground achievements ({:?})",
            sky.len(),
            sky_items.len(),
            ground.len(),
            ground_items.len(),
            self.config.strategy,
        );

        Placement {
            viewport: self.terrain.viewport(),
            sky,
            ground,
        }
    }

    fn record(&self, a: &Achievement, index: usize, x: f64, y: f64) -> PlacementRecord {
        let lc = self.config.layer(a.layer);
        let (category, anchor) = self.config.sprite(a.layer, index);
        log::trace!("{:?} achievement {} at ({x}, {y}) as `{category}`", a.layer, a.id);
        PlacementRecord {
            id: a.id,
            x,
            y,
            width: lc.width,
            height: lc.height,
            layer: a.layer,
            anchor,
            category,
            nudge: 0.0,
        }
    }

    /// Evenly spread `x` for the `index`-th of `count` items, plus seeded jitter.
    fn spread_x(&self, layer: Layer, id: u64, index: usize, count: usize) -> f64 {
        let lc = self.config.layer(layer);
        let (min_x, max_x) = self.terrain.x_bounds(lc.padding);
        let denom = count.saturating_sub(1).max(1) as f64;
        let base_x = (min_x + (index as f64 / denom) * (max_x - min_x)).round();
        base_x + ((seed_fraction(id, JITTER_X) - 0.5) * lc.jitter).round()
    }

    fn spread_sky(&self, items: &[&Achievement]) -> Vec<PlacementRecord> {
        let floor = self.config.sky_floor();
        let mut out = Vec::with_capacity(items.len());
        for (index, a) in items.iter().enumerate() {
            let x = self.spread_x(Layer::Sky, a.id, index, items.len());
            let max_y = self.terrain.sky_max_y(x, self.config.sky_margin);
            if max_y < floor {
                log::warn!("no sky band for achievement {} at x={x}", a.id);
                continue;
            }
            let span = (max_y - floor).max(1.0);
            let y = (floor + seed_fraction(a.id, SKY_Y) * span)
                .clamp(floor, max_y)
                .round();
            out.push(self.record(a, index, x, y));
        }
        out
    }

    fn spread_ground(&self, items: &[&Achievement]) -> Vec<PlacementRecord> {
        items
            .iter()
            .enumerate()
            .map(|(index, a)| {
                let x = self.spread_x(Layer::Ground, a.id, index, items.len());
                // The foot follows the jittered x, not the evenly spread one.
                let y = self.terrain.ground_surface_y(x);
                self.record(a, index, x, y)
            })
            .collect()
    }

    /// Previous record for `a` if it is still a valid position on this terrain.
    ///
    /// Positions from a placement computed for another viewport are never kept.
    fn reusable(&self, a: &Achievement, previous: Option<&Placement>) -> Option<Point> {
        let previous = previous?;
        if previous.viewport != self.terrain.viewport() {
            return None;
        }
        let prev = previous.find(a.id)?;
        if prev.layer != a.layer {
            return None;
        }
        let (min_x, max_x) = self.terrain.x_bounds(self.config.layer(a.layer).padding);
        if !(prev.x >= min_x && prev.x <= max_x) {
            return None;
        }
        match a.layer {
            Layer::Sky => self
                .terrain
                .can_place_in_sky(prev.x, prev.y, self.config.sky_margin, self.config.sky_floor())
                .then(|| Point::new(prev.x, prev.y)),
            Layer::Ground => Some(Point::new(prev.x, self.terrain.ground_surface_y(prev.x))),
        }
    }

    fn scatter_sky(&mut self, items: &[&Achievement], previous: Option<&Placement>) -> Vec<PlacementRecord> {
        let (min_x, max_x) = self.terrain.x_bounds(self.config.sky.padding);
        let floor = self.config.sky_floor();
        let spacing = self.config.sky.min_spacing;
        let mut out = Vec::with_capacity(items.len());
        for (index, a) in items.iter().enumerate() {
            let pos = self.reusable(a, previous).or_else(|| {
                (0..self.config.max_attempts).find_map(|attempt| {
                    let (rx, ry) = sample_pair(a.id, attempt);
                    let x = (min_x + rx * (max_x - min_x)).round();
                    let max_y = self.terrain.sky_max_y(x, self.config.sky_margin);
                    let y = (floor + ry * (max_y - floor)).round();
                    let ok = self
                        .terrain
                        .can_place_in_sky(x, y, self.config.sky_margin, floor)
                        && !too_close(Point::new(x, y), &self.used_sky, spacing);
                    ok.then(|| Point::new(x, y))
                })
            });
            let pos = pos.unwrap_or_else(|| {
                log::warn!("sky achievement {} fell back after {} attempts", a.id, self.config.max_attempts);
                Point::new(
                    (min_x + SKY_FALLBACK_OFFSET_X).min(max_x),
                    SKY_FALLBACK_Y.max(floor),
                )
            });
            self.used_sky.push(pos);
            out.push(self.record(a, index, pos.x, pos.y));
        }
        out
    }

    fn scatter_ground(&mut self, items: &[&Achievement], previous: Option<&Placement>) -> Vec<PlacementRecord> {
        let (min_x, max_x) = self.terrain.x_bounds(self.config.ground.padding);
        let spacing = self.config.ground.min_spacing;
        let mut out = Vec::with_capacity(items.len());
        for (index, a) in items.iter().enumerate() {
            let pos = self.reusable(a, previous).or_else(|| {
                (0..self.config.max_attempts).find_map(|attempt| {
                    let (rx, _) = sample_pair(a.id, attempt);
                    let x = (min_x + rx * (max_x - min_x)).round();
                    let p = Point::new(x, self.terrain.ground_surface_y(x));
                    (!too_close(p, &self.used_ground, spacing)).then_some(p)
                })
            });
            let pos = pos.unwrap_or_else(|| {
                log::warn!("ground achievement {} fell back after {} attempts", a.id, self.config.max_attempts);
                let x = ((min_x + max_x) / 2.0).round();
                Point::new(x, self.terrain.ground_surface_y(x))
            });
            self.used_ground.push(pos);
            out.push(self.record(a, index, pos.x, pos.y));
        }
        out
    }
}

fn too_close(p: Point, used: &[Point], min_dist: f64) -> bool {
    used.iter().any(|q| q.distance(p) < min_dist)
}

/// Run a single placement pass.
///
/// Shorthand for building a [`PlacementSession`] and calling
/// [`place`](PlacementSession::place).
pub fn place<C: Containment>(
    achievements: &[Achievement],
    config: &PlacementConfig,
    terrain: &TerrainGeneric<C>,
    previous: Option<&Placement>,
) -> Placement {
    PlacementSession::new(terrain, config).place(achievements, previous)
}
