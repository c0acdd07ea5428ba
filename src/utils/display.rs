//! Display and output formatting utilities

use crate::config::{OutputConfig, OutputFormat};
use crate::driver::{RunSummary, StopReason};
use crate::game_of_life::io::view_to_string;
use crate::game_of_life::{GridView, TickStats};
use anyhow::Result;

/// Moves the cursor home and clears the terminal
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Format frames and run reports
pub struct FrameFormatter;

impl FrameFormatter {
    /// Format one frame according to the output settings
    pub fn format_frame(view: &GridView, output: &OutputConfig) -> Result<String> {
        let frame = match output.format {
            OutputFormat::Text => view_to_string(view, output.live_char, output.dead_char),
            OutputFormat::Visual => {
                Self::format_grid_with_coords(view, output.live_char, output.dead_char)
            }
            OutputFormat::Json => {
                let mut json = serde_json::to_string(view)?;
                json.push('\n');
                json
            }
        };
        Ok(frame)
    }

    /// Format a grid with row and column rulers
    pub fn format_grid_with_coords(view: &GridView, live_char: char, dead_char: char) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for x in 0..view.cols {
            output.push_str(&format!("{}", x % 10));
        }
        output.push('\n');

        for (y, row) in view.row_slices().enumerate() {
            output.push_str(&format!("{:2} ", y % 100));
            output.extend(row.iter().map(|&cell| if cell { live_char } else { dead_char }));
            output.push('\n');
        }

        output
    }

    /// One-line status for a frame
    pub fn format_status(generation: u64, population: usize, tick: Option<&TickStats>) -> String {
        match tick {
            Some(stats) => format!(
                "Generation {} | Population {} | Born {} | Died {} | Evaluated {}",
                generation, population, stats.born, stats.died, stats.candidates
            ),
            None => format!("Generation {} | Population {}", generation, population),
        }
    }

    /// Summary printed when a run stops
    pub fn format_summary(summary: &RunSummary) -> String {
        let reason = match summary.outcome {
            StopReason::Extinct => "population died out".to_string(),
            StopReason::GenerationLimit => "generation limit reached".to_string(),
            StopReason::Cycle { period: 1 } => "reached a still life".to_string(),
            StopReason::Cycle { period } => format!("entered a cycle of period {}", period),
        };

        format!(
            "Stopped after {} generation(s): {} (final population {})",
            summary.generations, reason, summary.final_population
        )
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn sample() -> GridView {
        GridView::from_cells(vec![
            vec![true, false, true],
            vec![false, true, false],
            vec![true, false, true],
        ])
        .unwrap()
    }

    #[test]
    fn test_text_frame() {
        let output = Settings::default().output;
        let frame = FrameFormatter::format_frame(&sample(), &output).unwrap();
        assert_eq!(frame, "# #\n # \n# #\n");
    }

    #[test]
    fn test_frame_with_coords() {
        let frame = FrameFormatter::format_grid_with_coords(&sample(), '#', '.');
        assert!(frame.starts_with("   012\n"));
        assert!(frame.contains(" 1 .#.\n"));
    }

    #[test]
    fn test_json_frame() {
        let mut output = Settings::default().output;
        output.format = OutputFormat::Json;
        let frame = FrameFormatter::format_frame(&sample(), &output).unwrap();
        let parsed: GridView = serde_json::from_str(frame.trim()).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_summary_wording() {
        let summary = RunSummary {
            generations: 7,
            final_population: 4,
            outcome: StopReason::Cycle { period: 1 },
        };
        assert!(FrameFormatter::format_summary(&summary).contains("still life"));

        let summary = RunSummary {
            generations: 3,
            final_population: 0,
            outcome: StopReason::Extinct,
        };
        assert!(FrameFormatter::format_summary(&summary).contains("died out"));
    }

    #[test]
    fn test_status_line() {
        let stats = TickStats {
            generation: 2,
            candidates: 15,
            born: 2,
            died: 2,
            ..TickStats::default()
        };
        let line = FrameFormatter::format_status(2, 3, Some(&stats));
        assert!(line.contains("Evaluated 15"));
        assert_eq!(FrameFormatter::format_status(0, 3, None), "Generation 0 | Population 3");
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
    }
}
