//! Configuration settings for the Life simulator

use crate::game_of_life::find_pattern;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub rows: usize,
    pub cols: usize,
    /// Stop after this many generations; `None` runs until extinction
    pub max_generations: Option<u64>,
    pub frame_delay_ms: u64,
    pub detect_cycles: bool,
    /// Number of past frames remembered for cycle detection
    pub cycle_history: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Name of a built-in pattern
    pub pattern: Option<String>,
    /// Pattern text file; takes the place of `pattern`
    pub pattern_file: Option<PathBuf>,
    pub row_offset: usize,
    pub col_offset: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub live_char: char,
    pub dead_char: char,
    pub clear_screen: bool,
    pub show_stats: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Plain frames using `live_char` / `dead_char`
    Text,
    /// Frames with row and column rulers
    Visual,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                rows: 30,
                cols: 40,
                max_generations: None,
                frame_delay_ms: 300,
                detect_cycles: false,
                cycle_history: 64,
            },
            input: InputConfig {
                pattern: Some("hook".to_string()),
                pattern_file: None,
                row_offset: 0,
                col_offset: 0,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                live_char: '#',
                dead_char: ' ',
                clear_screen: true,
                show_stats: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// Only parses; call `validate` once any overrides have been merged.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.simulation.rows == 0 || self.simulation.cols == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.simulation.rows,
                self.simulation.cols
            );
        }

        if self.simulation.detect_cycles && self.simulation.cycle_history == 0 {
            anyhow::bail!("Cycle history must be positive when cycle detection is enabled");
        }

        match (&self.input.pattern, &self.input.pattern_file) {
            (Some(_), Some(_)) => {
                anyhow::bail!("Specify either a pattern name or a pattern file, not both")
            }
            (None, None) => anyhow::bail!("No seed given: set input.pattern or input.pattern_file"),
            (Some(name), None) => {
                if find_pattern(name).is_none() {
                    anyhow::bail!("Unknown pattern: {}", name);
                }
            }
            (None, Some(file)) => {
                if !file.exists() {
                    anyhow::bail!("Pattern file does not exist: {}", file.display());
                }
            }
        }

        if self.output.live_char == self.output.dead_char {
            anyhow::bail!("Live and dead characters must differ");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(rows) = cli_overrides.rows {
            self.simulation.rows = rows;
        }
        if let Some(cols) = cli_overrides.cols {
            self.simulation.cols = cols;
        }
        if let Some(generations) = cli_overrides.max_generations {
            self.simulation.max_generations = Some(generations);
        }
        if let Some(delay) = cli_overrides.frame_delay_ms {
            self.simulation.frame_delay_ms = delay;
        }
        if cli_overrides.detect_cycles {
            self.simulation.detect_cycles = true;
        }
        if let Some(ref pattern) = cli_overrides.pattern {
            self.input.pattern = Some(pattern.clone());
            self.input.pattern_file = None;
        }
        if let Some(ref file) = cli_overrides.pattern_file {
            self.input.pattern_file = Some(file.clone());
            self.input.pattern = None;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub max_generations: Option<u64>,
    pub frame_delay_ms: Option<u64>,
    pub detect_cycles: bool,
    pub pattern: Option<String>,
    pub pattern_file: Option<PathBuf>,
}
