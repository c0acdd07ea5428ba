//! Game of Life core functionality

pub mod cell;
pub mod engine;
pub mod grid;
pub mod index;
pub mod io;
pub mod patterns;
pub mod rules;

pub use cell::{Cell, CellState};
pub use engine::{LifeEngine, TickStats};
pub use grid::{Grid, GridView};
pub use index::LiveIndex;
pub use io::{
    create_example_patterns, load_pattern_file, parse_pattern, save_view_to_file, SeedPattern,
};
pub use patterns::{find_pattern, Pattern, PATTERNS};
pub use rules::{GameOfLifeRules, Transition};
