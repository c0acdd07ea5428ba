//! Pattern file I/O
//!
//! Format: one line per row. `#`, `1`, `O` or `*` mark a live cell; `.`,
//! `0`, `-` or a space mark a dead one. Lines starting with `!` are comments.
//! Short rows are padded with dead cells and trailing blank lines are ignored.

use super::patterns::{shift_cells, PATTERNS};
use super::GridView;
use anyhow::{Context, Result};
use std::path::Path;

/// Dimensions and live cells read from a pattern file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPattern {
    pub rows: usize,
    pub cols: usize,
    pub live: Vec<(usize, usize)>,
}

impl SeedPattern {
    /// Live cells shifted by the given offsets; `None` if a shift overflows
    pub fn placed(&self, row_offset: usize, col_offset: usize) -> Option<Vec<(usize, usize)>> {
        shift_cells(&self.live, row_offset, col_offset)
    }
}

/// Load a pattern from a text file
pub fn load_pattern_file<P: AsRef<Path>>(path: P) -> Result<SeedPattern> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_pattern(&content)
        .with_context(|| format!("Failed to parse pattern file: {}", path.as_ref().display()))
}

/// Parse a pattern from its text representation
pub fn parse_pattern(content: &str) -> Result<SeedPattern> {
    let mut lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.starts_with('!'))
        .map(|line| line.trim_end_matches('\r'))
        .collect();

    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no rows");
    }

    let rows = lines.len();
    let cols = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

    if cols == 0 {
        anyhow::bail!("Pattern rows cannot all be empty");
    }

    let mut live = Vec::new();
    for (row, line) in lines.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            match ch {
                '#' | '1' | 'O' | '*' => live.push((row, col)),
                '.' | '0' | '-' | ' ' => {}
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Expected one of '#1O*' or '.0- '",
                    ch,
                    row,
                    col
                ),
            }
        }
    }

    Ok(SeedPattern { rows, cols, live })
}

/// Render a view with the given characters, one line per row
pub fn view_to_string(view: &GridView, live_char: char, dead_char: char) -> String {
    let mut result = String::with_capacity(view.rows * (view.cols + 1));

    for row in view.row_slices() {
        result.extend(row.iter().map(|&cell| if cell { live_char } else { dead_char }));
        result.push('\n');
    }

    result
}

/// Save a view to a pattern file
pub fn save_view_to_file<P: AsRef<Path>>(view: &GridView, path: P) -> Result<()> {
    let content = view_to_string(view, '#', '.');

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write pattern to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Write every preset as `<name>.txt` into `output_dir`
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for pattern in PATTERNS {
        let (rows, cols) = pattern.extent();
        let mut view = GridView::new(rows, cols);
        for &(row, col) in pattern.cells {
            view.set(row, col, true)?;
        }

        let file = dir.join(format!("{}.txt", pattern.name));
        save_view_to_file(&view, &file)
            .with_context(|| format!("Failed to write example pattern {}", pattern.name))?;
    }

    Ok(())
}
