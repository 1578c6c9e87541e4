// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A garden scene: regions, viewport, achievements, and the latest placement.
//!
//! ## Snapshots
//!
//! Every recomputation builds a complete [`Placement`] and then swaps it in
//! behind an [`Arc`]. Readers holding an earlier snapshot keep a consistent
//! view; nobody ever observes a half-built result.
//!
//! ## Frames
//!
//! Hosts drive animation with a per-frame callback. Before scheduling one,
//! call [`Scene::request_frame`] and check [`Scene::is_frame_live`] (or just
//! call [`Scene::paint`], which does) when it fires. A resize or a new
//! achievement list cancels every outstanding token, so a loop started for an
//! old layout stops on its next frame instead of drawing alongside the new one.

use std::sync::Arc;

use garden_terrain::{Region, Terrain, Viewport, default_regions, validate_regions};
use kurbo::Point;

use crate::config::PlacementConfig;
use crate::paint::{Painter, SpriteSource, paint_layer};
use crate::picking::{Layers, hit_test_layers};
use crate::place::place;
use crate::record::{Achievement, Placement, PlacementRecord};

/// Handle for one scheduled animation frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken {
    epoch: u64,
}

/// Owns everything needed to place and draw one garden.
pub struct Scene {
    regions: Vec<Region>,
    config: PlacementConfig,
    achievements: Vec<Achievement>,
    terrain: Terrain,
    snapshot: Arc<Placement>,
    frame_epoch: u64,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scene")
            .field("regions", &self.regions.len())
            .field("viewport", &self.terrain.viewport())
            .field("achievements", &self.achievements.len())
            .field("placed", &self.snapshot.len())
            .field("frame_epoch", &self.frame_epoch)
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// Create an empty scene over `regions`.
    ///
    /// Fails when `regions` does not contain exactly one foreground region.
    pub fn new(
        regions: Vec<Region>,
        viewport: Viewport,
        config: PlacementConfig,
    ) -> garden_terrain::Result<Self> {
        validate_regions(&regions)?;
        Ok(Self::from_parts(regions, viewport, config))
    }

    /// Create an empty scene over the built-in mountain range.
    ///
    /// If the built-in outlines cannot be built the scene has no terrain at
    /// all: everything is sky and ground elements sit at the top edge.
    pub fn with_default_regions(viewport: Viewport, config: PlacementConfig) -> Self {
        let regions = default_regions().unwrap_or_else(|err| {
            log::warn!("built-in regions unavailable, placing without terrain: {err}");
            Vec::new()
        });
        Self::from_parts(regions, viewport, config)
    }

    fn from_parts(regions: Vec<Region>, viewport: Viewport, config: PlacementConfig) -> Self {
        let terrain = Terrain::new(&regions, viewport);
        Self {
            regions,
            config,
            achievements: Vec::new(),
            terrain,
            snapshot: Arc::new(Placement::empty(viewport)),
            frame_epoch: 0,
        }
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.terrain.viewport()
    }

    /// Terrain for the current viewport.
    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Placement configuration.
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Achievements in input order.
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    /// The achievement with `id`, for tooltip text.
    pub fn achievement(&self, id: u64) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    /// The latest committed placement.
    pub fn snapshot(&self) -> Arc<Placement> {
        Arc::clone(&self.snapshot)
    }

    /// Change the viewport. Returns `false` and does nothing when the size is
    /// unchanged; otherwise cancels outstanding frames and places everything
    /// again on a freshly built terrain.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if viewport == self.terrain.viewport() {
            return false;
        }
        self.cancel_frames();
        self.terrain = Terrain::new(&self.regions, viewport);
        log::debug!("resized to {}x{}", viewport.width(), viewport.height());
        self.recompute();
        true
    }

    /// Replace the achievement list, cancel outstanding frames, and place it.
    pub fn set_achievements(&mut self, achievements: Vec<Achievement>) {
        self.cancel_frames();
        self.achievements = achievements;
        self.recompute();
    }

    /// Replace the configuration and place everything again.
    pub fn set_config(&mut self, config: PlacementConfig) {
        self.config = config;
        self.recompute();
    }

    fn recompute(&mut self) {
        let next = place(
            &self.achievements,
            &self.config,
            &self.terrain,
            Some(&*self.snapshot),
        );
        log::debug!(
            "committed {} records for {}x{} (frame epoch {})",
            next.len(),
            next.viewport.width(),
            next.viewport.height(),
            self.frame_epoch,
        );
        self.snapshot = Arc::new(next);
    }

    /// The topmost placed record at `pt`, sky above ground.
    pub fn hit_test(&self, pt: Point, layers: Layers) -> Option<PlacementRecord> {
        hit_test_layers(&self.snapshot, pt, layers).cloned()
    }

    /// Issue a token for the next animation frame.
    pub fn request_frame(&self) -> FrameToken {
        FrameToken {
            epoch: self.frame_epoch,
        }
    }

    /// Whether `token` was issued since the last cancellation.
    pub fn is_frame_live(&self, token: FrameToken) -> bool {
        token.epoch == self.frame_epoch
    }

    /// Invalidate every outstanding frame token.
    pub fn cancel_frames(&mut self) {
        self.frame_epoch = self.frame_epoch.wrapping_add(1);
    }

    /// Draw the current snapshot, ground first and sky on top.
    ///
    /// Returns the number of records drawn; `0` when `token` has been
    /// cancelled or the sprites are still loading.
    pub fn paint(
        &self,
        token: FrameToken,
        sprites: &impl SpriteSource,
        painter: &mut impl Painter,
        time_ms: f64,
    ) -> usize {
        if !self.is_frame_live(token) {
            return 0;
        }
        let snapshot = &self.snapshot;
        paint_layer(&snapshot.ground, sprites, painter, time_ms)
            + paint_layer(&snapshot.sky, sprites, painter, time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{FallbackShape, Rgb, SpriteSet};
    use garden_terrain::{Layer, TerrainError};
    use kurbo::Rect;

    fn scene() -> Scene {
        let mut s = Scene::with_default_regions(Viewport::new(1200, 800), PlacementConfig::default());
        let mut list: Vec<Achievement> = (1..=6)
            .map(|id| Achievement::new(id, Layer::Ground).with_title(format!("Tree {id}")))
            .collect();
        list.extend((7..=10).map(|id| Achievement::new(id, Layer::Sky)));
        s.set_achievements(list);
        s
    }

    #[derive(Default)]
    struct Count(usize);

    impl Painter for Count {
        fn draw_sprite(&mut self, _: &str, _: Rect, _: f64) {
            self.0 += 1;
        }

        fn fill(&mut self, _: FallbackShape, _: Rgb, _: f64) {}
    }

    #[test]
    fn new_rejects_bad_region_sets() {
        let backdrop: Vec<Region> = default_regions()
            .unwrap()
            .into_iter()
            .filter(|r| !r.foreground)
            .collect();
        let err = Scene::new(backdrop, Viewport::new(100, 100), PlacementConfig::default()).unwrap_err();
        assert!(matches!(err, TerrainError::NoForeground));
    }

    #[test]
    fn set_achievements_places_everything() {
        let s = scene();
        let snap = s.snapshot();
        assert_eq!(snap.ground.len(), 6);
        assert!(!snap.sky.is_empty());
        assert_eq!(snap.viewport, Viewport::new(1200, 800));
        assert_eq!(s.achievement(3).map(|a| a.title.as_str()), Some("Tree 3"));
    }

    #[test]
    fn hit_test_finds_placed_records() {
        let s = scene();
        let snap = s.snapshot();
        for r in snap.ground.iter().chain(&snap.sky) {
            let hit = s.hit_test(r.footprint().center(), Layers::default());
            assert!(hit.is_some(), "nothing at the center of {}", r.id);
        }
        assert!(s.hit_test(Point::new(-500.0, -500.0), Layers::default()).is_none());
    }

    #[test]
    fn snapshots_are_replaced_not_patched() {
        let mut s = scene();
        let before = s.snapshot();
        assert!(s.resize(Viewport::new(800, 600)));
        let after = s.snapshot();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(before.viewport, Viewport::new(1200, 800));
        assert_eq!(after.viewport, Viewport::new(800, 600));
        for r in &after.ground {
            assert_eq!(r.y, s.terrain().ground_surface_y(r.x));
        }
    }

    #[test]
    fn resize_to_same_size_is_a_no_op() {
        let mut s = scene();
        let before = s.snapshot();
        let token = s.request_frame();
        assert!(!s.resize(Viewport::new(1200, 800)));
        assert!(Arc::ptr_eq(&before, &s.snapshot()));
        assert!(s.is_frame_live(token));
    }

    #[test]
    fn scattered_resize_matches_a_fresh_scene() {
        let config = PlacementConfig {
            strategy: crate::config::Strategy::Scatter,
            ..PlacementConfig::default()
        };
        let list: Vec<Achievement> = (1..=6).map(|id| Achievement::new(id, Layer::Ground)).collect();

        let mut resized = Scene::with_default_regions(Viewport::new(1200, 800), config.clone());
        resized.set_achievements(list.clone());
        resized.resize(Viewport::new(2400, 800));

        let mut fresh = Scene::with_default_regions(Viewport::new(2400, 800), config);
        fresh.set_achievements(list);

        assert_eq!(*resized.snapshot(), *fresh.snapshot());
    }

    #[test]
    fn resize_cancels_frames() {
        let mut s = scene();
        let token = s.request_frame();
        s.resize(Viewport::new(640, 480));
        assert!(!s.is_frame_live(token));
        assert!(s.is_frame_live(s.request_frame()));
    }

    #[test]
    fn paint_honours_tokens_and_preload() {
        let mut s = scene();
        let mut sprites = SpriteSet::expecting(["tree", "tree2", "tree3", "star"]);
        let mut painter = Count::default();

        let token = s.request_frame();
        assert_eq!(s.paint(token, &sprites, &mut painter, 0.0), 0);

        for c in ["tree", "tree2", "tree3", "star"] {
            sprites.mark_loaded(c);
        }
        let drawn = s.paint(token, &sprites, &mut painter, 0.0);
        assert_eq!(drawn, s.snapshot().len());
        assert_eq!(painter.0, drawn);

        s.set_achievements(Vec::new());
        assert_eq!(s.paint(token, &sprites, &mut painter, 16.0), 0);
        assert!(s.snapshot().is_empty());
    }

    #[test]
    fn default_scene_is_stable() {
        let a = scene().snapshot();
        let b = scene().snapshot();
        assert_eq!(*a, *b);
    }
}
