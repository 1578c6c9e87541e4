// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary queries over a scaled region set.
//!
//! A [`TerrainGeneric`] is built for one viewport and answers sky/ground
//! classification and ground-height questions. Height scans are memoized per
//! pixel column for the lifetime of the terrain, so a placement pass that asks
//! about the same column repeatedly pays for one scan. Rebuild the terrain when
//! the viewport changes; the memo goes with it.

use core::cell::OnceCell;
use core::fmt;

use kurbo::Point;

use crate::containment::{Containment, ExactOutline};
use crate::heightmap::HeightMap;
use crate::region::{Region, ScaledRegion, Viewport, scale_regions};

/// Fallback distance from the bottom edge for [`TerrainGeneric::lowest_ground_y`].
pub const LOWEST_GROUND_FALLBACK: f64 = 50.0;

/// Terrain using exact Bézier containment.
pub type Terrain = TerrainGeneric<ExactOutline>;

/// Per-column memo of height scans.
struct ColumnMemo {
    surface: Vec<OnceCell<f64>>,
    lowest: Vec<OnceCell<f64>>,
}

impl ColumnMemo {
    fn new(width: u32) -> Self {
        let n = width as usize;
        Self {
            surface: (0..n).map(|_| OnceCell::new()).collect(),
            lowest: (0..n).map(|_| OnceCell::new()).collect(),
        }
    }

    /// Column slot for `x`, if it falls inside the viewport.
    fn slot(&self, x: f64) -> Option<usize> {
        let col = x.round();
        if !col.is_finite() || col < 0.0 || col >= self.surface.len() as f64 {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Column is a non-negative integer below the viewport width."
        )]
        Some(col as usize)
    }
}

/// Boundary query engine over regions scaled to one viewport.
pub struct TerrainGeneric<C: Containment> {
    viewport: Viewport,
    regions: Vec<ScaledRegion<C>>,
    foreground: Option<usize>,
    memo: ColumnMemo,
}

impl<C: Containment> fmt::Debug for TerrainGeneric<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self.memo.surface.iter().filter(|c| c.get().is_some()).count();
        f.debug_struct("Terrain")
            .field("viewport", &self.viewport)
            .field("regions", &self.regions.len())
            .field("foreground", &self.foreground)
            .field("cached_columns", &cached)
            .finish_non_exhaustive()
    }
}

impl<C: Containment> TerrainGeneric<C> {
    /// Scale `regions` into `viewport` and build the query engine.
    ///
    /// The first region flagged as foreground is used for ground-surface
    /// queries. Without one, every point is treated as sky.
    pub fn new(regions: &[Region], viewport: Viewport) -> Self {
        let regions: Vec<ScaledRegion<C>> = scale_regions(regions, viewport);
        let foreground = regions.iter().position(ScaledRegion::is_foreground);
        if foreground.is_none() {
            log::warn!("terrain built without a foreground region; ground queries fall back");
        }
        Self {
            viewport,
            regions,
            foreground,
            memo: ColumnMemo::new(viewport.width()),
        }
    }

    /// Terrain with no geometry at all. Every point classifies as sky.
    ///
    /// Used when outlines are unavailable so queries fail closed.
    pub fn empty(viewport: Viewport) -> Self {
        Self::new(&[], viewport)
    }

    /// The viewport this terrain was scaled to.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Scaled regions in input order.
    pub fn regions(&self) -> &[ScaledRegion<C>] {
        &self.regions
    }

    /// Index of the foreground region, if any.
    pub fn foreground_index(&self) -> Option<usize> {
        self.foreground
    }

    /// Whether the point lies inside any region.
    pub fn is_inside_any_region(&self, x: f64, y: f64) -> bool {
        self.regions.iter().any(|r| r.contains(x, y))
    }

    /// Whether the point lies inside the foreground region.
    pub fn is_inside_foreground(&self, x: f64, y: f64) -> bool {
        self.foreground
            .is_some_and(|i| self.regions[i].contains(x, y))
    }

    /// Whether the point lies inside the region at `index`.
    ///
    /// Out-of-range indices are never inside.
    pub fn is_inside_region(&self, index: usize, x: f64, y: f64) -> bool {
        self.regions.get(index).is_some_and(|r| r.contains(x, y))
    }

    /// Whether the point is open sky, i.e. outside every region.
    pub fn is_sky(&self, x: f64, y: f64) -> bool {
        !self.is_inside_any_region(x, y)
    }

    /// Topmost pixel row of the foreground region in the column at `x`.
    ///
    /// Scans rows top to bottom and returns the first row inside the
    /// foreground, or `0.0` when the column has no foreground at all.
    /// Results are memoized per column.
    pub fn ground_surface_y(&self, x: f64) -> f64 {
        match self.memo.slot(x) {
            Some(col) => *self.memo.surface[col].get_or_init(|| self.scan_surface(x.round())),
            None => self.scan_surface(x.round()),
        }
    }

    /// Bottommost pixel row inside any region in the column at `x`.
    ///
    /// Scans rows bottom to top. Falls back to `height - 50` when the column
    /// is empty. This is a different notion of "ground" from
    /// [`ground_surface_y`](Self::ground_surface_y) and is kept separate.
    pub fn lowest_ground_y(&self, x: f64) -> f64 {
        match self.memo.slot(x) {
            Some(col) => *self.memo.lowest[col].get_or_init(|| self.scan_lowest(x.round())),
            None => self.scan_lowest(x.round()),
        }
    }

    fn scan_surface(&self, x: f64) -> f64 {
        let Some(fg) = self.foreground.map(|i| &self.regions[i]) else {
            return 0.0;
        };
        let bounds = fg.bounds();
        if !(x >= bounds.x0 && x <= bounds.x1) {
            return 0.0;
        }
        let height = f64::from(self.viewport.height());
        // Rows above the outline's bounds cannot be inside it.
        let mut y = bounds.y0.floor().max(0.0);
        while y < height {
            if fg.outline().contains(Point::new(x, y)) {
                return y;
            }
            y += 1.0;
        }
        0.0
    }

    fn scan_lowest(&self, x: f64) -> f64 {
        let height = f64::from(self.viewport.height());
        let mut y = height - 1.0;
        while y >= 0.0 {
            if self.is_inside_any_region(x, y) {
                return y;
            }
            y -= 1.0;
        }
        height - LOWEST_GROUND_FALLBACK
    }

    /// Lowest row a sky element may occupy at `x`: `margin` above the ground
    /// surface, never negative.
    pub fn sky_max_y(&self, x: f64, margin: f64) -> f64 {
        (self.ground_surface_y(x) - margin).max(0.0)
    }

    /// Vertical `(min_y, max_y)` band for sky elements at `x`.
    pub fn sky_y_bounds(&self, x: f64, margin: f64, min_y: f64) -> (f64, f64) {
        (min_y, self.sky_max_y(x, margin))
    }

    /// Horizontal `(min_x, max_x)` bounds after padding.
    ///
    /// `max_x` never drops below `min_x + 1`.
    pub fn x_bounds(&self, padding: f64) -> (f64, f64) {
        let width = f64::from(self.viewport.width());
        let min_x = padding;
        (min_x, (width - padding).max(min_x + 1.0))
    }

    /// Whether a sky element may sit at `(x, y)`: within the vertical sky band
    /// and outside every region.
    pub fn can_place_in_sky(&self, x: f64, y: f64, margin: f64, min_y: f64) -> bool {
        if !(y >= min_y && y <= self.sky_max_y(x, margin)) {
            return false;
        }
        self.is_sky(x, y)
    }

    /// Normalized height of [`lowest_ground_y`](Self::lowest_ground_y) at a
    /// normalized horizontal position, clamped to `[0, 1]`.
    pub fn bottom_fraction_at(&self, x_fraction: f64) -> f64 {
        let width = f64::from(self.viewport.width());
        let height = f64::from(self.viewport.height());
        let y = self.lowest_ground_y((x_fraction * width).round());
        (y / height).clamp(0.0, 1.0)
    }

    /// Normalized height of [`ground_surface_y`](Self::ground_surface_y) at a
    /// normalized horizontal position, clamped to `[0, 1]`.
    pub fn surface_fraction_at(&self, x_fraction: f64) -> f64 {
        let width = f64::from(self.viewport.width());
        let height = f64::from(self.viewport.height());
        let y = self.ground_surface_y((x_fraction * width).round());
        (y / height).clamp(0.0, 1.0)
    }

    /// Bake [`ground_surface_y`](Self::ground_surface_y) for every column.
    pub fn height_map(&self) -> HeightMap {
        HeightMap::from_fn(self.viewport.width(), |x| self.ground_surface_y(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containment::FlattenedOutline;
    use crate::region::default_regions;

    fn terrain() -> Terrain {
        Terrain::new(&default_regions().unwrap(), Viewport::new(1200, 800))
    }

    #[test]
    fn surface_matches_the_foreground_cubic() {
        let t = terrain();
        // Design x = 300 is the cubic's apex at t = 0.5, design y = 60.
        // 533 + 60 * 1.335 = 613.1, so row 614 is the first inside.
        assert_eq!(t.ground_surface_y(360.0), 614.0);
        // Design x = 500 is t = 5/6, design y ≈ 86.667 → 648.7.
        assert_eq!(t.ground_surface_y(600.0), 649.0);
    }

    #[test]
    fn surface_rests_on_the_boundary() {
        let t = terrain();
        for x in (10..1200).step_by(37) {
            let x = f64::from(x);
            let y = t.ground_surface_y(x);
            assert!(t.is_inside_foreground(x, y), "foot inside at x={x}");
            assert!(!t.is_inside_foreground(x, y - 1.0), "row above outside at x={x}");
        }
    }

    #[test]
    fn surface_is_memoized_per_column() {
        let t = terrain();
        let a = t.ground_surface_y(400.0);
        let b = t.ground_surface_y(400.3);
        assert_eq!(a, b);
        assert!(t.memo.surface[400].get().is_some());
    }

    #[test]
    fn columns_outside_the_scene_fall_back() {
        let t = terrain();
        assert_eq!(t.ground_surface_y(-500.0), 0.0);
        assert_eq!(t.ground_surface_y(f64::NAN), 0.0);
        assert_eq!(t.lowest_ground_y(-500.0), 750.0);
    }

    #[test]
    fn lowest_ground_scans_from_the_bottom() {
        let t = terrain();
        assert_eq!(t.lowest_ground_y(600.0), 799.0);
        assert!((t.bottom_fraction_at(0.5) - 799.0 / 800.0).abs() < 1e-12);
    }

    #[test]
    fn sky_and_ground_classification() {
        let t = terrain();
        assert!(t.is_sky(600.0, 100.0));
        assert!(!t.is_sky(600.0, 790.0));
        assert!(t.is_inside_foreground(600.0, 790.0));
        // Backdrop layers reach higher than the foreground near the right edge.
        assert!(t.is_inside_region(0, 900.0, 640.0));
        assert!(!t.is_inside_foreground(900.0, 640.0));
        assert!(!t.is_inside_region(9, 600.0, 790.0));
    }

    #[test]
    fn sky_placement_rules() {
        let t = terrain();
        let max_y = t.sky_max_y(360.0, 28.0);
        assert_eq!(max_y, 586.0);
        assert_eq!(t.sky_y_bounds(360.0, 28.0, 60.0), (60.0, 586.0));
        assert!(t.can_place_in_sky(360.0, 300.0, 28.0, 60.0));
        assert!(!t.can_place_in_sky(360.0, 40.0, 28.0, 60.0));
        assert!(!t.can_place_in_sky(360.0, 600.0, 28.0, 60.0));
        assert_eq!(t.x_bounds(40.0), (40.0, 1160.0));
        assert_eq!(t.x_bounds(700.0), (700.0, 701.0));
    }

    #[test]
    fn empty_terrain_fails_closed() {
        let t = Terrain::empty(Viewport::new(300, 200));
        assert!(t.is_sky(150.0, 199.0));
        assert!(!t.is_inside_foreground(150.0, 199.0));
        assert_eq!(t.ground_surface_y(150.0), 0.0);
        assert_eq!(t.lowest_ground_y(150.0), 150.0);
    }

    #[test]
    fn rebuilding_for_the_same_viewport_is_equivalent() {
        let regions = default_regions().unwrap();
        let a = Terrain::new(&regions, Viewport::new(800, 600));
        let b = Terrain::new(&regions, Viewport::new(800, 600));
        for x in (0..800).step_by(40) {
            for y in (0..600).step_by(30) {
                let (x, y) = (f64::from(x), f64::from(y));
                assert_eq!(a.is_sky(x, y), b.is_sky(x, y), "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn flattened_terrain_tracks_exact_surface() {
        let regions = default_regions().unwrap();
        let exact = Terrain::new(&regions, Viewport::new(1200, 800));
        let flat: TerrainGeneric<FlattenedOutline> =
            TerrainGeneric::new(&regions, Viewport::new(1200, 800));
        for x in (20..1200).step_by(53) {
            let x = f64::from(x);
            let d = (exact.ground_surface_y(x) - flat.ground_surface_y(x)).abs();
            assert!(d <= 1.0, "surface differs by {d} at x={x}");
        }
    }
}
