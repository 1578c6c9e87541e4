// Copyright 2025 the Garden Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coarse sky/ground classification grid with occupancy.
//!
//! The grid samples normalized positions (`0..=1` on both axes, `0` at the
//! top) and classifies each against a ground-height function. The first ground
//! cell from the top of each column is the contour. Cells can be claimed so
//! that repeated [`TerrainGrid::find_free_cell`] calls hand out distinct slots.

use crate::Layer;
use crate::containment::Containment;
use crate::terrain::TerrainGeneric;

/// Default number of grid columns.
pub const DEFAULT_COLS: usize = 48;

/// Default number of grid rows.
pub const DEFAULT_ROWS: usize = 32;

/// Classification of a grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// Above the ground line.
    Sky,
    /// At or below the ground line.
    Ground,
    /// The topmost ground cell of its column.
    Contour,
}

/// One sample of the grid.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Column index.
    pub col: usize,
    /// Row index, `0` at the top.
    pub row: usize,
    /// Horizontal position in `[0, 1]`.
    pub x_fraction: f64,
    /// Vertical position in `[0, 1]`, `0` at the top.
    pub y_fraction: f64,
    /// Classification.
    pub kind: CellKind,
    /// Whether the cell has been claimed.
    pub occupied: bool,
}

impl Cell {
    fn is_ground(&self) -> bool {
        matches!(self.kind, CellKind::Ground | CellKind::Contour)
    }
}

/// A classified `cols × rows` grid, stored row-major.
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

fn fraction(i: usize, n: usize) -> f64 {
    if n <= 1 {
        0.5
    } else {
        i as f64 / (n - 1) as f64
    }
}

impl TerrainGrid {
    /// Build and classify a grid.
    ///
    /// `ground_fraction` maps a normalized x to the normalized height of the
    /// ground line there.
    pub fn new(cols: usize, rows: usize, mut ground_fraction: impl FnMut(f64) -> f64) -> Self {
        let mut cells = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell {
                    col,
                    row,
                    x_fraction: fraction(col, cols),
                    y_fraction: fraction(row, rows),
                    kind: CellKind::Sky,
                    occupied: false,
                });
            }
        }
        let mut grid = Self { cols, rows, cells };
        for col in 0..cols {
            let ground = ground_fraction(fraction(col, cols));
            let mut contour_marked = false;
            for row in 0..rows {
                let cell = &mut grid.cells[row * cols + col];
                if cell.y_fraction >= ground {
                    cell.kind = if contour_marked {
                        CellKind::Ground
                    } else {
                        contour_marked = true;
                        CellKind::Contour
                    };
                }
            }
        }
        grid
    }

    /// Classify against a terrain's bottom-most ground line
    /// ([`bottom_fraction_at`](TerrainGeneric::bottom_fraction_at)).
    pub fn from_terrain<C: Containment>(terrain: &TerrainGeneric<C>, cols: usize, rows: usize) -> Self {
        Self::new(cols, rows, |xf| terrain.bottom_fraction_at(xf))
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at `(col, row)`, if in range.
    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    /// Find an unclaimed cell for `layer`.
    ///
    /// Columns are visited in a shuffled order derived from `seed`; within a
    /// column, rows are scanned from the top. Ground accepts ground and
    /// contour cells, sky accepts sky cells. The cell is not claimed; pass it
    /// to [`occupy`](Self::occupy) once used.
    pub fn find_free_cell(&self, layer: Layer, seed: u64) -> Option<Cell> {
        for col in shuffled(self.cols, seed) {
            for row in 0..self.rows {
                let cell = &self.cells[row * self.cols + col];
                if cell.occupied {
                    continue;
                }
                let fits = match layer {
                    Layer::Ground => cell.is_ground(),
                    Layer::Sky => cell.kind == CellKind::Sky,
                };
                if fits {
                    return Some(*cell);
                }
            }
        }
        None
    }

    /// Claim the cell at `(col, row)`. Returns `false` if out of range.
    pub fn occupy(&mut self, col: usize, row: usize) -> bool {
        if col >= self.cols || row >= self.rows {
            return false;
        }
        self.cells[row * self.cols + col].occupied = true;
        true
    }
}

/// Xorshift64 generator for the column shuffle.
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        // Xorshift has a fixed point at zero.
        Self(seed ^ 0x9E37_79B9_7F4A_7C15)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

/// Fisher-Yates shuffle of `0..n`.
fn shuffled(n: usize, seed: u64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = Rng::new(seed);
    for i in (1..n).rev() {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Result is below i + 1, which fits in usize."
        )]
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        order.swap(i, j);
    }
    order
}
