//! Grid storage and read-only snapshots for Game of Life

use super::cell::Cell;
use crate::error::LifeError;
use anyhow::Result;
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Iterate the grid-bounded Moore neighbours of `(row, col)`.
///
/// Positions outside `[0, rows) x [0, cols)` are never produced.
pub fn neighbors(
    rows: usize,
    cols: usize,
    row: usize,
    col: usize,
) -> impl Iterator<Item = (usize, usize)> {
    iproduct!(-1isize..=1, -1isize..=1)
        .filter(|&(dr, dc)| dr != 0 || dc != 0)
        .filter_map(move |(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < rows && c < cols).then_some((r, c))
        })
}

/// Fixed-size cell storage owned by the engine
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate `rows x cols` dead cells
    pub fn new(rows: usize, cols: usize) -> Result<Self, LifeError> {
        if rows == 0 || cols == 0 {
            return Err(LifeError::InvalidDimension { rows, cols });
        }

        let cells = iproduct!(0..rows, 0..cols)
            .map(|(row, col)| Cell::new(row, col))
            .collect();

        Ok(Self { rows, cols, cells })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Flatten 2D coordinates to a row-major index
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Bounds-checked flattening
    pub fn checked_index(&self, row: usize, col: usize) -> Result<usize, LifeError> {
        if row < self.rows && col < self.cols {
            Ok(self.index(row, col))
        } else {
            Err(LifeError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    #[inline]
    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    /// Flattened indices of the bounded neighbours of the cell at `index`
    pub fn neighbor_indices(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let (row, col) = (index / self.cols, index % self.cols);
        neighbors(self.rows, self.cols, row, col).map(move |(r, c)| self.index(r, c))
    }

    /// Count live neighbours using the committed `alive` flags only
    pub fn live_neighbor_count(&self, index: usize) -> u8 {
        self.neighbor_indices(index)
            .filter(|&n| self.cells[n].is_alive())
            .count() as u8
    }

    /// Copy the committed state out into a snapshot
    pub fn view(&self) -> GridView {
        GridView {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(Cell::is_alive).collect(),
        }
    }
}

/// Read-only row-major snapshot of alive/dead state
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridView {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<bool>,
}

impl GridView {
    /// Create an all-dead view
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Create a view from a 2D boolean array
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self> {
        if cells.is_empty() {
            anyhow::bail!("Grid cannot be empty");
        }

        let rows = cells.len();
        let cols = cells[0].len();

        if cols == 0 {
            anyhow::bail!("Grid width cannot be zero");
        }

        for (i, row) in cells.iter().enumerate() {
            if row.len() != cols {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), cols);
            }
        }

        Ok(Self {
            rows,
            cols,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Get cell value at coordinates; out of bounds reads as dead
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[self.index(row, col)]
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<(), LifeError> {
        if row >= self.rows || col >= self.cols {
            return Err(LifeError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let idx = self.index(row, col);
        self.cells[idx] = value;
        Ok(())
    }

    /// Count living neighbours, treating off-grid positions as dead
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        neighbors(self.rows, self.cols, row, col)
            .filter(|&(r, c)| self.cells[self.index(r, c)])
            .count() as u8
    }

    /// All living cell coordinates in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.rows, 0..self.cols)
            .filter(|&(row, col)| self.get(row, col))
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Iterate rows as slices
    pub fn row_slices(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.cols.max(1))
    }
}

impl fmt::Display for GridView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.row_slices() {
            for &cell in row {
                write!(f, "{}", if cell { '#' } else { ' ' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
