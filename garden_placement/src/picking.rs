// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing and hover transitions.
//!
//! ## Usage
//!
//! 1) On pointer move, hit test the current placement with [`hit_test_layers`]
//!    (or [`Scene::hit_test`](crate::Scene::hit_test)).
//! 2) Feed the hit id (or `None`) to [`HoverState::update`].
//! 3) Show a tooltip on `Enter(id)` and hide it on `Leave(id)`.
//!
//! ```
//! use garden_placement::picking::{HoverEvent, HoverState};
//! let mut h: HoverState<u64> = HoverState::new();
//! assert_eq!(h.update(Some(7)), vec![HoverEvent::Enter(7)]);
//! assert_eq!(h.update(Some(9)), vec![HoverEvent::Leave(7), HoverEvent::Enter(9)]);
//! assert_eq!(h.update(None), vec![HoverEvent::Leave(9)]);
//! ```

use kurbo::Point;

use crate::record::{Placement, PlacementRecord};

bitflags::bitflags! {
    /// Layers that participate in a hit test.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Layers: u8 {
        /// Stars and other sky elements.
        const SKY    = 0b0000_0001;
        /// Trees on the ground.
        const GROUND = 0b0000_0010;
    }
}

impl Default for Layers {
    fn default() -> Self {
        Self::SKY | Self::GROUND
    }
}

/// The topmost record of `records` whose footprint contains `pt`.
///
/// `records` must be in draw order; the scan runs back to front so the last
/// drawn record wins. Footprint edges count as inside.
pub fn hit_test(records: &[PlacementRecord], pt: Point) -> Option<&PlacementRecord> {
    records.iter().rev().find(|r| r.contains(pt))
}

/// Hit test a whole placement. The sky layer is drawn above the ground, so it
/// is tested first.
pub fn hit_test_layers(placement: &Placement, pt: Point, layers: Layers) -> Option<&PlacementRecord> {
    if layers.contains(Layers::SKY)
        && let Some(hit) = hit_test(&placement.sky, pt)
    {
        return Some(hit);
    }
    if layers.contains(Layers::GROUND) {
        return hit_test(&placement.ground, pt);
    }
    None
}

/// Tracks the hovered element and reports transitions.
///
/// At most one element is hovered at a time. Moving directly from one element
/// to another emits the leave before the enter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState<K: Copy + Eq> {
    current: Option<K>,
}

/// A hover transition, returned by [`HoverState::update`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// The pointer moved onto the element: show its tooltip.
    Enter(K),
    /// The pointer moved off the element: hide its tooltip.
    Leave(K),
}

impl<K: Copy + Eq> HoverState<K> {
    /// Create a state with nothing hovered.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// The hovered element, if any.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Forget the hovered element, returning its leave event.
    pub fn clear(&mut self) -> Vec<HoverEvent<K>> {
        self.current.take().map(HoverEvent::Leave).into_iter().collect()
    }

    /// Record the latest hit and return the transitions from the previous one.
    pub fn update(&mut self, hit: Option<K>) -> Vec<HoverEvent<K>> {
        if hit == self.current {
            return Vec::new();
        }
        let mut out = self.clear();
        if let Some(k) = hit {
            out.push(HoverEvent::Enter(k));
        }
        self.current = hit;
        out
    }
}
