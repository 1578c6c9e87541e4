// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point containment for pixel-space outlines.
//!
//! Terrain queries only ever ask one question of an outline: does this point lie
//! inside the filled area under the nonzero rule? [`Containment`] is that seam,
//! so the engine never depends on a host rendering surface.
//!
//! - [`ExactOutline`] (default): analytic winding numbers over the original
//!   quadratic and cubic segments.
//! - [`FlattenedOutline`]: curves flattened to polylines at a fixed tolerance,
//!   then a crossing-number winding test. Slightly cheaper per query and easy
//!   to port to other backends.

use core::fmt::Debug;

use kurbo::{BezPath, PathEl, Point, Rect, Shape};

/// Flattening tolerance in pixels used by [`FlattenedOutline`].
pub const FLATTEN_TOLERANCE: f64 = 0.1;

/// A closed pixel-space outline that answers point-in-fill queries.
pub trait Containment: Debug {
    /// Build from an already transformed path.
    fn from_path(path: &BezPath) -> Self
    where
        Self: Sized;

    /// Whether `pt` lies inside the filled outline (nonzero rule).
    ///
    /// Non-finite points are never inside.
    fn contains(&self, pt: Point) -> bool;

    /// Conservative axis-aligned bounds of the outline.
    fn bounds(&self) -> Rect;
}

fn in_bounds(bounds: Rect, pt: Point) -> bool {
    pt.x >= bounds.x0 && pt.x <= bounds.x1 && pt.y >= bounds.y0 && pt.y <= bounds.y1
}

/// Exact containment using kurbo's winding number on the Bézier path.
#[derive(Clone, Debug)]
pub struct ExactOutline {
    path: BezPath,
    bounds: Rect,
}

impl Containment for ExactOutline {
    fn from_path(path: &BezPath) -> Self {
        Self {
            path: path.clone(),
            bounds: path.bounding_box(),
        }
    }

    fn contains(&self, pt: Point) -> bool {
        if !(pt.x.is_finite() && pt.y.is_finite()) || !in_bounds(self.bounds, pt) {
            return false;
        }
        self.path.winding(pt) != 0
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Containment over a flattened polyline approximation of the outline.
#[derive(Clone, Debug)]
pub struct FlattenedOutline {
    rings: Vec<Vec<Point>>,
    bounds: Rect,
}

impl FlattenedOutline {
    /// Flatten `path` with an explicit tolerance.
    pub fn with_tolerance(path: &BezPath, tolerance: f64) -> Self {
        let mut rings: Vec<Vec<Point>> = Vec::new();
        kurbo::flatten(path.iter(), tolerance, |el| match el {
            PathEl::MoveTo(p) => rings.push(vec![p]),
            PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
                match rings.last_mut() {
                    Some(ring) => ring.push(p),
                    None => rings.push(vec![p]),
                }
            }
            // Rings are implicitly closed by the winding test.
            PathEl::ClosePath => {}
        });
        rings.retain(|r| r.len() >= 3);
        Self {
            rings,
            bounds: path.bounding_box(),
        }
    }

    /// Number of vertices across all rings.
    pub fn vertex_count(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }

    fn winding(&self, pt: Point) -> i32 {
        let mut winding = 0;
        for ring in &self.rings {
            let n = ring.len();
            for i in 0..n {
                let a = ring[i];
                let b = ring[(i + 1) % n];
                if a.y <= pt.y {
                    if b.y > pt.y && is_left(a, b, pt) > 0.0 {
                        winding += 1;
                    }
                } else if b.y <= pt.y && is_left(a, b, pt) < 0.0 {
                    winding -= 1;
                }
            }
        }
        winding
    }
}

/// Twice the signed area of triangle `a b p`; positive when `p` is left of `a→b`.
#[inline]
fn is_left(a: Point, b: Point, p: Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}

impl Containment for FlattenedOutline {
    fn from_path(path: &BezPath) -> Self {
        Self::with_tolerance(path, FLATTEN_TOLERANCE)
    }

    fn contains(&self, pt: Point) -> bool {
        if !(pt.x.is_finite() && pt.y.is_finite()) || !in_bounds(self.bounds, pt) {
            return false;
        }
        self.winding(pt) != 0
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
