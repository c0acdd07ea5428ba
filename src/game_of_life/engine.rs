//! Incremental Life engine.
//!
//! Each tick only evaluates the candidate set: live cells and their
//! grid-bounded neighbours. Every other cell is dead with fewer than three
//! live neighbours and cannot change. A generation clock doubles as the
//! per-cell "visited this tick" stamp, so nothing is reset between ticks.

use super::cell::CellState;
use super::grid::{Grid, GridView};
use super::index::LiveIndex;
use super::rules::{GameOfLifeRules, Transition};
use crate::error::LifeError;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Counters describing the most recent `advance`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickStats {
    /// Generation reached by this tick
    pub generation: u64,
    /// Distinct cells evaluated
    pub candidates: usize,
    pub stayed_dead: usize,
    pub died: usize,
    pub born: usize,
    pub survived: usize,
    /// Cells committed from the changed list
    pub changed: usize,
}

impl TickStats {
    fn record(&mut self, transition: Transition) {
        self.candidates += 1;
        match transition {
            Transition::StaysDead => self.stayed_dead += 1,
            Transition::Dies => self.died += 1,
            Transition::Born => self.born += 1,
            Transition::Survives => self.survived += 1,
        }
    }
}

/// Owns the grid, the live-cell index and the generation clock
#[derive(Debug, Clone)]
pub struct LifeEngine {
    grid: Grid,
    live: LiveIndex,
    clock: u64,
    changed: Vec<usize>,
    last_tick: Option<TickStats>,
}

impl LifeEngine {
    /// Build a `rows x cols` grid with the given cells alive.
    ///
    /// Duplicate coordinates are harmless. Every coordinate is validated
    /// before the engine is returned.
    pub fn new<I>(rows: usize, cols: usize, live_coordinates: I) -> Result<Self, LifeError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Grid::new(rows, cols)?;
        let seeds = live_coordinates
            .into_iter()
            .map(|(row, col)| grid.checked_index(row, col))
            .collect::<Result<Vec<_>, _>>()?;

        let mut live = LiveIndex::new();
        for index in seeds {
            grid.cell_mut(index).alive = true;
            live.insert(index);
        }

        debug!(rows, cols, population = live.len(), "life engine constructed");

        Ok(Self {
            grid,
            live,
            clock: 0,
            changed: Vec::new(),
            last_tick: None,
        })
    }

    /// Seed an engine from a snapshot
    pub fn from_view(view: &GridView) -> Result<Self, LifeError> {
        Self::new(view.rows, view.cols, view.living_cells())
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Completed generations so far
    #[inline]
    pub fn generation(&self) -> u64 {
        self.clock
    }

    /// Number of live cells, O(1)
    #[inline]
    pub fn population_count(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_extinct(&self) -> bool {
        self.live.is_empty()
    }

    pub fn cell_state(&self, row: usize, col: usize) -> Result<CellState, LifeError> {
        let index = self.grid.checked_index(row, col)?;
        Ok(self.grid.cell(index).state())
    }

    /// Committed state of every cell, row-major
    pub fn snapshot(&self) -> GridView {
        self.grid.view()
    }

    /// Sorted coordinates of live cells, read from the index
    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        let mut cells: Vec<_> = self.live.iter().map(|i| self.coordinates(i)).collect();
        cells.sort_unstable();
        cells
    }

    pub fn last_tick(&self) -> Option<&TickStats> {
        self.last_tick.as_ref()
    }

    /// Coordinates of the cells that flipped during the last tick
    pub fn last_changed(&self) -> Vec<(usize, usize)> {
        self.changed.iter().map(|&i| self.coordinates(i)).collect()
    }

    /// Compute and commit exactly one generation
    pub fn advance(&mut self) {
        let order: Vec<usize> = self.live.iter().collect();
        self.advance_with_order(order);
    }

    /// Tick with an explicit traversal of the live cells.
    ///
    /// `live_order` must be a permutation of the live index.
    pub(crate) fn advance_with_order(&mut self, live_order: Vec<usize>) {
        debug_assert_eq!(live_order.len(), self.live.len());
        debug_assert!(live_order.iter().all(|&index| self.live.contains(index)));

        let clock = self.clock;
        let mut changed = std::mem::take(&mut self.changed);
        changed.clear();
        let mut stats = TickStats {
            generation: clock + 1,
            ..TickStats::default()
        };

        let mut neighbourhood = Vec::with_capacity(9);
        for live_index in live_order {
            neighbourhood.clear();
            neighbourhood.push(live_index);
            neighbourhood.extend(self.grid.neighbor_indices(live_index));

            for &index in &neighbourhood {
                self.evaluate(index, clock, &mut changed, &mut stats);
            }
        }

        for &index in &changed {
            let cell = self.grid.cell_mut(index);
            debug_assert_ne!(cell.pending_alive, cell.alive);
            cell.commit();
            if cell.is_alive() {
                self.live.insert(index);
            } else {
                self.live.remove(index);
            }
        }

        stats.changed = changed.len();
        self.changed = changed;
        self.clock += 1;

        trace!(
            generation = stats.generation,
            candidates = stats.candidates,
            born = stats.born,
            died = stats.died,
            population = self.live.len(),
            "tick committed"
        );
        self.last_tick = Some(stats);
    }

    /// Stage the next state of one candidate unless this tick already did
    fn evaluate(
        &mut self,
        index: usize,
        clock: u64,
        changed: &mut Vec<usize>,
        stats: &mut TickStats,
    ) {
        if self.grid.cell(index).processed_at(clock) {
            return;
        }

        // counted before any cell is committed, so only pre-tick state is read
        let neighbours = self.grid.live_neighbor_count(index);
        let cell = self.grid.cell_mut(index);
        let before = cell.is_alive();
        let after = GameOfLifeRules::should_be_alive(before, neighbours);

        if cell.stage(after, clock) {
            changed.push(index);
        }
        stats.record(Transition::classify(before, after));
    }

    #[inline]
    fn coordinates(&self, index: usize) -> (usize, usize) {
        let cell = self.grid.cell(index);
        (cell.row(), cell.col())
    }
}
