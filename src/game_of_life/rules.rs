//! Conway's rule and the full-scan reference stepper

use super::GridView;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Whether a cell is alive next generation, given its state and live neighbour count
    #[inline]
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        matches!((current_state, neighbor_count), (true, 2) | (true, 3) | (false, 3))
    }

    /// Evolve a whole view one generation by rebuilding every cell.
    ///
    /// This is the double-buffer design: O(rows * cols) per tick regardless of
    /// population. The incremental engine must always agree with it.
    pub fn evolve(current: &GridView) -> GridView {
        let cols = current.cols;
        let cells: Vec<bool> = (0..current.rows * cols)
            .into_par_iter()
            .map(|idx| {
                let (row, col) = (idx / cols, idx % cols);
                Self::should_be_alive(current.get(row, col), current.count_neighbors(row, col))
            })
            .collect();

        GridView {
            rows: current.rows,
            cols,
            cells,
        }
    }

    /// Maximum neighbour count in a Moore neighbourhood
    pub const fn max_neighbor_count() -> u8 {
        8
    }
}

/// The four ways a cell can pass through one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    StaysDead,
    Dies,
    Born,
    Survives,
}

impl Transition {
    pub fn classify(before: bool, after: bool) -> Self {
        match (before, after) {
            (false, false) => Transition::StaysDead,
            (true, false) => Transition::Dies,
            (false, true) => Transition::Born,
            (true, true) => Transition::Survives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_logic() {
        assert!(GameOfLifeRules::should_be_alive(true, 2)); // survival
        assert!(GameOfLifeRules::should_be_alive(true, 3));
        assert!(GameOfLifeRules::should_be_alive(false, 3)); // birth
        assert!(!GameOfLifeRules::should_be_alive(true, 1)); // underpopulation
        assert!(!GameOfLifeRules::should_be_alive(true, 4)); // overpopulation
        assert!(!GameOfLifeRules::should_be_alive(false, 2));
        assert!(!GameOfLifeRules::should_be_alive(false, 0));
        assert!(!GameOfLifeRules::should_be_alive(true, GameOfLifeRules::max_neighbor_count()));
    }

    #[test]
    fn test_still_life_block() {
        let cells = vec![
            vec![false, false, false, false],
            vec![false, true, true, false],
            vec![false, true, true, false],
            vec![false, false, false, false],
        ];
        let view = GridView::from_cells(cells).unwrap();
        assert_eq!(GameOfLifeRules::evolve(&view), view);
    }

    #[test]
    fn test_oscillator_blinker() {
        let cells = vec![
            vec![false, false, false],
            vec![true, true, true],
            vec![false, false, false],
        ];
        let view = GridView::from_cells(cells).unwrap();
        let evolved = GameOfLifeRules::evolve(&view);

        let expected = GridView::from_cells(vec![
            vec![false, true, false],
            vec![false, true, false],
            vec![false, true, false],
        ])
        .unwrap();

        assert_eq!(evolved, expected);
        assert_eq!(GameOfLifeRules::evolve(&evolved), view);
    }

    #[test]
    fn test_transition_classification() {
        assert_eq!(Transition::classify(false, false), Transition::StaysDead);
        assert_eq!(Transition::classify(true, false), Transition::Dies);
        assert_eq!(Transition::classify(false, true), Transition::Born);
        assert_eq!(Transition::classify(true, true), Transition::Survives);
    }
}
