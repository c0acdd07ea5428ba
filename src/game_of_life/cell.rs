//! A single grid position and its per-tick bookkeeping

use serde::{Deserialize, Serialize};

/// Public view of a cell's current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    Alive,
    Dead,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        matches!(self, CellState::Alive)
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// One cell of the grid.
///
/// `pending_alive` only carries meaning while a tick is in progress; outside
/// of `LifeEngine::advance` the `alive` flag is authoritative.
#[derive(Debug, Clone)]
pub struct Cell {
    row: usize,
    col: usize,
    pub(crate) alive: bool,
    pub(crate) pending_alive: bool,
    pub(crate) last_processed_at: Option<u64>,
}

impl Cell {
    /// Create a dead, never-visited cell
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            alive: false,
            pending_alive: false,
            last_processed_at: None,
        }
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.col
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn state(&self) -> CellState {
        CellState::from(self.alive)
    }

    /// Whether this cell was already evaluated during the tick stamped `clock`
    #[inline]
    pub(crate) fn processed_at(&self, clock: u64) -> bool {
        self.last_processed_at == Some(clock)
    }

    /// Record the next state and stamp the cell; returns true if the state flips
    #[inline]
    pub(crate) fn stage(&mut self, next_alive: bool, clock: u64) -> bool {
        self.pending_alive = next_alive;
        self.last_processed_at = Some(clock);
        self.pending_alive != self.alive
    }

    /// Apply the staged state
    #[inline]
    pub(crate) fn commit(&mut self) {
        self.alive = self.pending_alive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_dead_and_unvisited() {
        let cell = Cell::new(3, 4);
        assert_eq!((cell.row(), cell.col()), (3, 4));
        assert!(!cell.is_alive());
        assert_eq!(cell.state(), CellState::Dead);
        assert!(!cell.processed_at(0));
    }

    #[test]
    fn test_stage_and_commit() {
        let mut cell = Cell::new(0, 0);
        assert!(cell.stage(true, 0));
        assert!(cell.processed_at(0));
        assert!(!cell.processed_at(1));
        // staging does not touch the authoritative state
        assert!(!cell.is_alive());

        cell.commit();
        assert!(cell.is_alive());
        assert!(!cell.stage(true, 1));
    }

    #[test]
    fn test_cell_state_from_bool() {
        assert_eq!(CellState::from(true), CellState::Alive);
        assert!(!CellState::from(false).is_alive());
    }
}
