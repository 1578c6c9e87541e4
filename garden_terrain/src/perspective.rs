// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sky height levels and depth-based scaling.

use crate::region::Viewport;

/// Named heights in the sky, as fractions of the viewport height.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkyLevel {
    /// 60% down from the top.
    Low,
    /// 40% down from the top.
    Mid,
    /// 20% down from the top.
    High,
}

impl SkyLevel {
    /// Fraction of the viewport height from the top.
    pub const fn fraction(self) -> f64 {
        match self {
            Self::Low => 0.6,
            Self::Mid => 0.4,
            Self::High => 0.2,
        }
    }
}

/// Horizon lines used for perspective, nearest (lowest) first.
pub const PERSPECTIVE_LINE_FRACTIONS: [f64; 4] = [0.8, 0.6, 0.4, 0.2];

/// Scale at the topmost perspective line.
pub const PERSPECTIVE_MIN_SCALE: f64 = 0.6;

/// Scale at the bottommost perspective line.
pub const PERSPECTIVE_MAX_SCALE: f64 = 1.2;

/// Pixel row for a height fraction, rounded and clamped to the viewport.
pub fn height_y(viewport: Viewport, fraction: f64) -> f64 {
    let h = f64::from(viewport.height());
    (h * fraction).round().clamp(0.0, h)
}

/// Pixel row of a named sky level.
pub fn sky_level_y(viewport: Viewport, level: SkyLevel) -> f64 {
    height_y(viewport, level.fraction())
}

/// Pixel rows of the perspective lines.
pub fn perspective_lines(viewport: Viewport) -> [f64; 4] {
    PERSPECTIVE_LINE_FRACTIONS.map(|f| height_y(viewport, f))
}

/// Scale factor for something drawn at row `y`.
///
/// Linear from `min_scale` at the topmost perspective line to `max_scale` at
/// the bottommost, clamped outside that span.
pub fn perspective_scale(viewport: Viewport, y: f64, min_scale: f64, max_scale: f64) -> f64 {
    let lines = perspective_lines(viewport);
    let top = lines.iter().copied().fold(f64::INFINITY, f64::min);
    let bottom = lines.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if bottom == top {
        return (min_scale + max_scale) / 2.0;
    }
    let t = ((y - top) / (bottom - top)).clamp(0.0, 1.0);
    min_scale + t * (max_scale - min_scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sky_levels_in_pixels() {
        let vp = Viewport::new(1200, 800);
        assert_eq!(sky_level_y(vp, SkyLevel::Low), 480.0);
        assert_eq!(sky_level_y(vp, SkyLevel::Mid), 320.0);
        assert_eq!(sky_level_y(vp, SkyLevel::High), 160.0);
        assert_eq!(height_y(vp, 1.5), 800.0);
    }

    #[test]
    fn scale_interpolates_between_lines() {
        let vp = Viewport::new(1200, 800);
        assert_eq!(perspective_lines(vp), [640.0, 480.0, 320.0, 160.0]);
        let s = |y| perspective_scale(vp, y, PERSPECTIVE_MIN_SCALE, PERSPECTIVE_MAX_SCALE);
        assert_eq!(s(160.0), 0.6);
        assert_eq!(s(0.0), 0.6);
        assert!((s(400.0) - 0.9).abs() < 1e-12);
        assert!((s(640.0) - 1.2).abs() < 1e-12);
        assert!((s(790.0) - 1.2).abs() < 1e-12);
    }

    #[test]
    fn tiny_viewport_still_has_a_span() {
        // Lines round to rows 1, 1, 0, 0.
        let vp = Viewport::new(1, 1);
        assert_eq!(perspective_scale(vp, 0.0, 0.6, 1.2), 0.6);
        assert!((perspective_scale(vp, 1.0, 0.6, 1.2) - 1.2).abs() < 1e-12);
    }
}
