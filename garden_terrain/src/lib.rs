// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Garden Terrain: kurbo-native terrain regions and boundary queries.
//!
//! The garden scene is a stack of mountain silhouettes over a sky. This crate
//! owns that geometry and answers the questions placement code needs:
//!
//! - Scale closed region outlines from design space into viewport pixels.
//! - Classify points as sky or ground, against any region or the foreground.
//! - Find the ground surface (topmost foreground row) and the lowest ground row
//!   of any pixel column, memoized per column.
//! - Bake a dense [`HeightMap`], build a coarse [`TerrainGrid`], and compute
//!   sky levels and perspective scale.
//!
//! Containment is pluggable through the [`Containment`] trait so the engine
//! never needs a host drawing surface. [`ExactOutline`] (the default, used by
//! [`Terrain`]) computes winding numbers over the Bézier segments;
//! [`FlattenedOutline`] tests against a polyline approximation.
//!
//! ## Caching
//!
//! A [`TerrainGeneric`] is bound to one [`Viewport`]. Scaling the outlines and
//! scanning columns dominate the cost of a recomputation, so build a terrain
//! once per viewport and share it for the whole placement pass. Rebuilding for
//! a new viewport discards every memoized column.
//!
//! ## Failure model
//!
//! Only parsing outlines can fail ([`TerrainError`]). Queries fail closed: a
//! terrain without geometry ([`TerrainGeneric::empty`]) reports every point as
//! sky, and columns without a foreground report a ground surface of `0`.
//!
//! # Example
//!
//! ```rust
//! use garden_terrain::{Terrain, Viewport, default_regions};
//!
//! let regions = default_regions().unwrap();
//! let terrain = Terrain::new(&regions, Viewport::new(1200, 800));
//!
//! // The foreground hill crests at design x = 300.
//! let foot = terrain.ground_surface_y(360.0);
//! assert!(terrain.is_inside_foreground(360.0, foot));
//! assert!(!terrain.is_inside_foreground(360.0, foot - 1.0));
//! assert!(terrain.is_sky(360.0, 100.0));
//! ```

pub mod containment;
pub mod error;
pub mod grid;
pub mod heightmap;
pub mod perspective;
pub mod region;
pub mod terrain;

pub use containment::{Containment, ExactOutline, FlattenedOutline};
pub use error::{Result, TerrainError};
pub use grid::{Cell, CellKind, TerrainGrid};
pub use heightmap::HeightMap;
pub use perspective::{SkyLevel, perspective_scale, sky_level_y};
pub use region::{
    MOUNTAIN_OUTLINES, Region, RegionDef, ScaledRegion, Viewport, default_regions, parse_regions,
    scale_regions, validate_regions,
};
pub use terrain::{Terrain, TerrainGeneric};

/// Which part of the scene an element belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layer {
    /// Above the terrain: stars, clouds.
    Sky,
    /// Resting on the foreground surface: trees.
    Ground,
}
