// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while building a region set.
//!
//! Queries never fail; only the construction of outlines from path data does.

use kurbo::SvgParseError;
use thiserror::Error;

/// Result alias for terrain construction.
pub type Result<T> = core::result::Result<T, TerrainError>;

/// Failure while constructing or validating regions.
#[derive(Debug, Error)]
pub enum TerrainError {
    /// A region's SVG path data could not be parsed.
    #[error("invalid outline for region {index}: {source}")]
    InvalidOutline {
        /// Position of the offending region in the input list.
        index: usize,
        /// Parser error reported by kurbo.
        #[source]
        source: SvgParseError,
    },

    /// No region is marked as foreground.
    #[error("region set has no foreground region")]
    NoForeground,

    /// More than one region is marked as foreground.
    #[error("region set has {count} foreground regions, expected exactly one")]
    MultipleForegrounds {
        /// Number of regions flagged as foreground.
        count: usize,
    },
}
