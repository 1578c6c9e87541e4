// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Garden Placement: deterministic, terrain-aware positions for achievements.
//!
//! Achievements become trees standing on the foreground hill or stars in the
//! sky above it. Given a [`Terrain`](garden_terrain::Terrain) and a list of
//! [`Achievement`]s, a placement pass produces one [`PlacementRecord`] per
//! achievement that satisfies:
//!
//! - Ground records stand exactly on the ground contour: the foot is inside the
//!   foreground region and the row above it is not.
//! - Sky records sit inside the padded sky band, clear of every region.
//! - Neighbours keep a minimum horizontal spacing whenever the layer fits.
//! - Everything stays within the padded viewport.
//! - The same ids, terrain, and configuration always give the same result.
//!
//! Records come back depth-sorted, ready for drawing with [`paint_layer`] and
//! picking with [`hit_test`].
//!
//! ## Sessions and scenes
//!
//! [`PlacementSession`] holds the bookkeeping of one pass and is dropped with
//! it; there is no hidden global state, so independent scenes never interfere.
//! [`Scene`] wraps the whole lifecycle: it rebuilds the terrain on resize,
//! recomputes on list changes, publishes results as shared snapshots, and
//! cancels stale animation frames.
//!
//! # Example
//!
//! ```rust
//! use garden_placement::{Achievement, Layer, Layers, PlacementConfig, Scene};
//! use garden_terrain::Viewport;
//!
//! let mut scene = Scene::with_default_regions(Viewport::new(1200, 800), PlacementConfig::default());
//! scene.set_achievements(vec![
//!     Achievement::new(1, Layer::Ground).with_title("First commit"),
//!     Achievement::new(2, Layer::Ground),
//!     Achievement::new(3, Layer::Sky),
//! ]);
//!
//! let snapshot = scene.snapshot();
//! assert_eq!(snapshot.ground.len(), 2);
//! for tree in &snapshot.ground {
//!     assert_eq!(tree.y, scene.terrain().ground_surface_y(tree.x));
//! }
//!
//! // Pointing at a tree finds it.
//! let first = snapshot.find(1).unwrap();
//! let hit = scene.hit_test(first.footprint().center(), Layers::GROUND).unwrap();
//! assert!(hit.contains(first.footprint().center()));
//! ```

pub mod config;
pub mod correct;
pub mod paint;
pub mod picking;
pub mod place;
pub mod record;
pub mod scene;
pub mod seed;

pub use config::{Category, LayerConfig, PlacementConfig, Strategy};
pub use correct::{correct_layer, depth_sort, enforce_spacing, nudge_overlaps};
pub use garden_terrain::Layer;
pub use paint::{FallbackShape, Painter, Rgb, SpriteSet, SpriteSource, paint_layer, twinkle_alpha};
pub use picking::{HoverEvent, HoverState, Layers, hit_test, hit_test_layers};
pub use place::{PlacementSession, place};
pub use record::{Achievement, Placement, PlacementRecord};
pub use scene::{FrameToken, Scene};
