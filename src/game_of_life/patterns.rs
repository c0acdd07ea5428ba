//! Named seed patterns

/// A preset pattern given as live-cell offsets from its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "block",
        description: "2x2 still life",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "blinker",
        description: "period 2 oscillator",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "toad",
        description: "period 2 oscillator",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "beacon",
        description: "period 2 oscillator",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "glider",
        description: "spaceship moving diagonally down-right",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "hook",
        description: "hook-and-diagonal demo seed for a 30x40 grid",
        cells: &[
            (2, 3), (2, 4), (2, 5), (2, 6), (2, 7),
            (3, 7), (4, 6), (5, 5), (6, 4), (7, 3),
        ],
    },
];

impl Pattern {
    /// Live coordinates shifted by the given offsets; `None` if a shift overflows
    pub fn placed(&self, row_offset: usize, col_offset: usize) -> Option<Vec<(usize, usize)>> {
        shift_cells(self.cells, row_offset, col_offset)
    }

    /// Smallest `(rows, cols)` that holds the pattern unshifted
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(rows, cols), &(r, c)| (rows.max(r + 1), cols.max(c + 1)))
    }
}

/// Shift coordinates by an offset, failing on `usize` overflow
pub(crate) fn shift_cells(
    cells: &[(usize, usize)],
    row_offset: usize,
    col_offset: usize,
) -> Option<Vec<(usize, usize)>> {
    cells
        .iter()
        .map(|&(r, c)| Some((r.checked_add(row_offset)?, c.checked_add(col_offset)?)))
        .collect()
}

/// Look up a preset by name, ignoring case
pub fn find_pattern(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
