// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Post-placement correction: horizontal repulsion, bounds, declutter, and
//! depth order.
//!
//! Every pass operates on one layer's records and is deterministic. The full
//! sequence is applied by [`correct_layer`].

use garden_terrain::{Containment, Layer, TerrainGeneric};

use crate::config::PlacementConfig;
use crate::record::PlacementRecord;

/// Sort by `x`, then push neighbours apart to at least `min_spacing` and keep
/// everything inside `[min_x, max_x]`.
///
/// A left-to-right pass moves crowded records right; records pushed past
/// `max_x` are clamped and a right-to-left pass then walks their left
/// neighbours back. When the layer cannot fit at the requested spacing the
/// bounds win and some pairs stay closer than `min_spacing`.
pub fn enforce_spacing(records: &mut [PlacementRecord], min_x: f64, max_x: f64, min_spacing: f64) {
    records.sort_by(|a, b| a.x.total_cmp(&b.x));
    let n = records.len();
    if n == 0 {
        return;
    }
    records[0].x = records[0].x.max(min_x);
    for i in 1..n {
        let floor = records[i - 1].x + min_spacing;
        if records[i].x < floor {
            records[i].x = floor;
        }
    }
    for r in records.iter_mut() {
        r.x = r.x.min(max_x);
    }
    for i in (0..n - 1).rev() {
        let ceil = records[i + 1].x - min_spacing;
        if records[i].x > ceil {
            records[i].x = ceil;
        }
    }
    for r in records.iter_mut() {
        r.x = r.x.clamp(min_x, max_x);
    }
}

/// Overlap of two intervals, never negative.
fn overlap(a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    (a1.min(b1) - a0.max(b0)).max(0.0)
}

/// Nudge the nearer record of each heavily overlapping adjacent pair down.
///
/// Records must already be sorted by `x`. A pair overlapping by more than
/// `threshold` on both axes pushes the record with the larger draw `y` (the
/// second one on ties) down by `min(max_nudge, ceil(overlap_y / 2))`. This is
/// a heuristic; residual overlap is acceptable.
pub fn nudge_overlaps(records: &mut [PlacementRecord], threshold: f64, max_nudge: f64) {
    for i in 0..records.len().saturating_sub(1) {
        let a = records[i].footprint();
        let b = records[i + 1].footprint();
        let ox = overlap(a.x0, a.x1, b.x0, b.x1);
        let oy = overlap(a.y0, a.y1, b.y0, b.y1);
        if ox > threshold && oy > threshold {
            let front = if records[i].draw_y() > records[i + 1].draw_y() {
                i
            } else {
                i + 1
            };
            records[front].nudge += max_nudge.min((oy / 2.0).ceil());
        }
    }
}

/// Stable sort into draw order by [`PlacementRecord::depth_key`].
pub fn depth_sort(records: &mut [PlacementRecord]) {
    records.sort_by(|a, b| a.depth_key().total_cmp(&b.depth_key()));
}

/// Apply the full correction sequence to one layer.
///
/// After spacing and clamping, ground feet are re-anchored to the surface at
/// their final `x`, and sky records that are no longer valid sky positions are
/// dropped.
pub fn correct_layer<C: Containment>(
    records: &mut Vec<PlacementRecord>,
    layer: Layer,
    terrain: &TerrainGeneric<C>,
    config: &PlacementConfig,
) {
    let lc = config.layer(layer);
    let (min_x, max_x) = terrain.x_bounds(lc.padding);
    enforce_spacing(records, min_x, max_x, lc.min_spacing);

    match layer {
        Layer::Ground => {
            for r in records.iter_mut() {
                r.y = terrain.ground_surface_y(r.x);
            }
        }
        Layer::Sky => {
            let floor = config.sky_floor();
            records.retain(|r| {
                let ok = terrain.can_place_in_sky(r.x, r.y, config.sky_margin, floor);
                if !ok {
                    log::warn!("dropping sky record {} at ({}, {})", r.id, r.x, r.y);
                }
                ok
            });
        }
    }

    nudge_overlaps(records, config.overlap_threshold, config.max_vertical_nudge);
    depth_sort(records);
}
