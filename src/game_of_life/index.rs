//! Live-cell index keyed by flattened grid position

use rustc_hash::FxHashSet;

/// Set of row-major indices of every live cell.
///
/// Keys are positions, never cell values: a cell's coordinates are fixed for
/// its lifetime while its state is not.
#[derive(Debug, Clone, Default)]
pub struct LiveIndex {
    cells: FxHashSet<usize>,
}

impl LiveIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the index was not already present
    #[inline]
    pub fn insert(&mut self, index: usize) -> bool {
        self.cells.insert(index)
    }

    /// Returns true if the index was present
    #[inline]
    pub fn remove(&mut self, index: usize) -> bool {
        self.cells.remove(&index)
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate live indices in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().copied()
    }
}
