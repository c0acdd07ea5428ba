//! Incremental Game of Life engine
//!
//! Simulates Conway's Game of Life on a bounded grid. Each generation only
//! evaluates live cells and their neighbours, tracked through a live-cell
//! index and a generation clock, instead of rescanning the whole grid.

pub mod config;
pub mod driver;
pub mod error;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use driver::{Driver, RunSummary, StopReason};
pub use error::LifeError;
pub use game_of_life::{CellState, GridView, LifeEngine};

use anyhow::Result;

/// Run a configured simulation, handing every frame to `on_frame`
pub fn run_simulation<F>(settings: &Settings, on_frame: F) -> Result<RunSummary>
where
    F: FnMut(&GridView, &LifeEngine) -> Result<()>,
{
    settings.validate()?;
    let mut driver = Driver::from_settings(settings)?;
    driver.run(on_frame)
}
