// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dense per-column ground heights.

/// Ground-surface heights sampled at every integer column.
///
/// Derived from [`Terrain::ground_surface_y`](crate::Terrain::ground_surface_y)
/// and never a separate source of truth: rebuild it together with the terrain.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeightMap {
    columns: Vec<f64>,
}

impl HeightMap {
    /// Sample `f` at every column `0..width`.
    pub fn from_fn(width: u32, mut f: impl FnMut(f64) -> f64) -> Self {
        Self {
            columns: (0..width).map(|x| f(f64::from(x))).collect(),
        }
    }

    /// Height at `x`, rounded and clamped to the nearest baked column.
    ///
    /// Returns `0.0` for an empty map.
    pub fn ground_y_at(&self, x: f64) -> f64 {
        let Some(last) = self.columns.len().checked_sub(1) else {
            return 0.0;
        };
        let x = if x.is_finite() { x.round() } else { 0.0 };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Clamped into the column range first."
        )]
        let col = x.clamp(0.0, last as f64) as usize;
        self.columns[col]
    }

    /// Number of baked columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no columns were baked.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// All baked heights, left to right.
    pub fn as_slice(&self) -> &[f64] {
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Terrain, Viewport, default_regions};

    #[test]
    fn lookup_clamps_and_rounds() {
        let map = HeightMap::from_fn(4, |x| x * 10.0);
        assert_eq!(map.as_slice(), &[0.0, 10.0, 20.0, 30.0]);
        assert_eq!(map.ground_y_at(1.4), 10.0);
        assert_eq!(map.ground_y_at(1.6), 20.0);
        assert_eq!(map.ground_y_at(-8.0), 0.0);
        assert_eq!(map.ground_y_at(99.0), 30.0);
        assert_eq!(map.ground_y_at(f64::NAN), 0.0);
    }

    #[test]
    fn empty_map_yields_zero() {
        let map = HeightMap::default();
        assert!(map.is_empty());
        assert_eq!(map.ground_y_at(5.0), 0.0);
    }

    #[test]
    fn baked_map_matches_direct_queries() {
        let terrain = Terrain::new(&default_regions().unwrap(), Viewport::new(400, 300));
        let map = terrain.height_map();
        assert_eq!(map.len(), 400);
        for x in [1.0, 57.0, 200.0, 399.0] {
            assert_eq!(map.ground_y_at(x), terrain.ground_surface_y(x));
        }
    }
}
