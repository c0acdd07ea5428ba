//! Error types for the Life engine

use thiserror::Error;

/// Errors raised by engine construction and cell queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifeError {
    /// Grid dimensions must both be positive.
    #[error("Invalid grid dimensions {rows}x{cols}: rows and cols must be positive")]
    InvalidDimension { rows: usize, cols: usize },

    /// A coordinate fell outside `[0, rows) x [0, cols)`.
    #[error("Coordinates ({row}, {col}) out of range for {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}
