// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region definitions and their projection into viewport pixel space.
//!
//! Outlines are authored in a normalized design space that is 1000 units wide.
//! Backdrop layers are 300 units tall and fill the bottom half of the viewport;
//! the foreground layer is 200 units tall and fills the bottom third.

use kurbo::{Affine, BezPath, Rect, Size};

use crate::containment::Containment;
use crate::error::{Result, TerrainError};

/// Width of the design space shared by every outline.
pub const DESIGN_WIDTH: f64 = 1000.0;

/// Height of the design space for backdrop outlines.
pub const BACKDROP_DESIGN_HEIGHT: f64 = 300.0;

/// Height of the design space for the foreground outline.
pub const FOREGROUND_DESIGN_HEIGHT: f64 = 200.0;

/// Source data for one region: SVG path data plus its role.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RegionDef {
    /// SVG path data in design space.
    pub path: &'static str,
    /// Whether this is the walkable foreground layer.
    pub foreground: bool,
}

/// The mountain silhouettes of the garden scene, back to front.
pub const MOUNTAIN_OUTLINES: [RegionDef; 4] = [
    RegionDef {
        path: "M0,220 Q150,120 300,200 T600,200 T1000,180 L1000,300 L0,300 Z",
        foreground: false,
    },
    RegionDef {
        path: "M0,240 Q180,140 360,220 T720,220 T1000,200 L1000,300 L0,300 Z",
        foreground: false,
    },
    RegionDef {
        path: "M0,260 Q200,160 400,240 T800,240 T1000,220 L1000,300 L0,300 Z",
        foreground: false,
    },
    RegionDef {
        path: "M0,120 C200,40 400,40 600,120 C750,170 900,140 1000,120 L1000,200 L0,200 Z",
        foreground: true,
    },
];

/// A closed outline in design space.
///
/// Regions are immutable once built. Only the foreground region is consulted
/// for ground-surface heights; backdrop regions only matter for sky checks.
#[derive(Clone, Debug)]
pub struct Region {
    /// Closed outline in design space.
    pub outline: BezPath,
    /// Whether this is the walkable foreground layer.
    pub foreground: bool,
}

impl Region {
    /// Create a region from an existing outline.
    pub fn new(outline: BezPath, foreground: bool) -> Self {
        Self {
            outline,
            foreground,
        }
    }
}

/// Parse a list of region definitions.
///
/// Fails on the first definition whose path data does not parse.
pub fn parse_regions(defs: &[RegionDef]) -> Result<Vec<Region>> {
    defs.iter()
        .enumerate()
        .map(|(index, def)| {
            BezPath::from_svg(def.path)
                .map(|outline| Region::new(outline, def.foreground))
                .map_err(|source| TerrainError::InvalidOutline { index, source })
        })
        .collect()
}

/// The built-in mountain regions, parsed from [`MOUNTAIN_OUTLINES`].
pub fn default_regions() -> Result<Vec<Region>> {
    parse_regions(&MOUNTAIN_OUTLINES)
}

/// Check that exactly one region is marked as foreground.
pub fn validate_regions(regions: &[Region]) -> Result<()> {
    match regions.iter().filter(|r| r.foreground).count() {
        0 => Err(TerrainError::NoForeground),
        1 => Ok(()),
        count => Err(TerrainError::MultipleForegrounds { count }),
    }
}

/// Viewport size in whole pixels. Both dimensions are at least 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Create a viewport, clamping degenerate dimensions to 1.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width: if width == 0 { 1 } else { width },
            height: if height == 0 { 1 } else { height },
        }
    }

    /// Create a viewport from a floating-point size, rounding to whole pixels.
    ///
    /// Non-finite, zero, and negative dimensions clamp to 1.
    pub fn from_size(size: Size) -> Self {
        fn px(v: f64) -> u32 {
            if !v.is_finite() || v < 1.0 {
                return 1;
            }
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Value is clamped into the u32 range first."
            )]
            let px = v.round().min(f64::from(u32::MAX)) as u32;
            px
        }
        Self::new(px(size.width), px(size.height))
    }

    /// Width in pixels.
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub const fn height(self) -> u32 {
        self.height
    }

    /// Size as a kurbo [`Size`].
    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Transform mapping a region's design space into viewport pixels.
///
/// `scale_x = width / 1000` for every region. The foreground occupies a band of
/// `round(height / 3)` pixels at the bottom, backdrops a band of
/// `round(height / 2)` pixels.
pub fn region_transform(foreground: bool, viewport: Viewport) -> Affine {
    let w = f64::from(viewport.width());
    let h = f64::from(viewport.height());
    let (band, design_height) = if foreground {
        ((h / 3.0).round(), FOREGROUND_DESIGN_HEIGHT)
    } else {
        ((h / 2.0).round(), BACKDROP_DESIGN_HEIGHT)
    };
    Affine::new([w / DESIGN_WIDTH, 0.0, 0.0, band / design_height, 0.0, h - band])
}

/// A region projected into viewport pixels, ready for containment queries.
#[derive(Clone, Debug)]
pub struct ScaledRegion<C> {
    outline: C,
    foreground: bool,
}

impl<C: Containment> ScaledRegion<C> {
    /// Project `region` into `viewport`.
    pub fn new(region: &Region, viewport: Viewport) -> Self {
        let mut path = region.outline.clone();
        path.apply_affine(region_transform(region.foreground, viewport));
        Self {
            outline: C::from_path(&path),
            foreground: region.foreground,
        }
    }

    /// Whether this is the foreground region.
    pub fn is_foreground(&self) -> bool {
        self.foreground
    }

    /// The containment outline in pixel space.
    pub fn outline(&self) -> &C {
        &self.outline
    }

    /// Pixel-space bounding box.
    pub fn bounds(&self) -> Rect {
        self.outline.bounds()
    }

    /// Whether the pixel-space point lies inside the filled outline.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.outline.contains(kurbo::Point::new(x, y))
    }
}

/// Project every region into `viewport`.
///
/// Pure and deterministic; callers cache the result per viewport since this is
/// the dominant cost of a recomputation.
pub fn scale_regions<C: Containment>(regions: &[Region], viewport: Viewport) -> Vec<ScaledRegion<C>> {
    regions
        .iter()
        .map(|r| ScaledRegion::new(r, viewport))
        .collect()
}
