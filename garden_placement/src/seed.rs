// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stateless per-id pseudo-random fractions.
//!
//! A placement must be reproducible from the achievement id alone, so instead
//! of a stateful generator each draw is `frac(|sin(id·a + k)·b|)` for a small
//! offset `k`. Distinct offsets give values that look independent.

const SCALE: f64 = 12.9898;
const AMPLITUDE: f64 = 43_758.545_3;

/// Offset for the horizontal jitter draw.
pub const JITTER_X: u32 = 1;

/// Offset for the vertical draw in the sky band.
pub const SKY_Y: u32 = 2;

/// First offset used by rejection sampling; attempt `n` uses
/// `SAMPLE_BASE + 2n` and `SAMPLE_BASE + 2n + 1`.
pub const SAMPLE_BASE: u32 = 16;

/// A fraction in `[0, 1)` derived from `id` and `offset`.
pub fn seed_fraction(id: u64, offset: u32) -> f64 {
    let id = id as f64;
    let v = ((id * SCALE + f64::from(offset)).sin() * AMPLITUDE).abs();
    let f = v.fract();
    // `fract` of a finite non-negative value is already in [0, 1).
    if f.is_finite() { f } else { 0.0 }
}

/// The pair of fractions for rejection-sampling attempt `attempt`.
pub fn sample_pair(id: u64, attempt: u32) -> (f64, f64) {
    let k = SAMPLE_BASE.saturating_add(attempt.saturating_mul(2));
    (seed_fraction(id, k), seed_fraction(id, k.saturating_add(1)))
}
