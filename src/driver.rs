//! Simulation driver: the frame loop that sits outside the engine.
//!
//! Once per iteration the driver checks the population, hands a snapshot to a
//! frame callback, waits out the frame delay and advances one generation. The
//! engine itself never decides when a run is over; generation limits and
//! cycle detection live here.

use crate::config::{InputConfig, Settings, SimulationConfig};
use crate::game_of_life::{find_pattern, load_pattern_file, GridView, LifeEngine};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use std::time::Duration;
use tracing::{debug, info};

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Population reached zero
    Extinct,
    /// The configured generation limit was reached
    GenerationLimit,
    /// The current frame repeats the one seen `period` generations earlier
    Cycle { period: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub generations: u64,
    pub final_population: usize,
    pub outcome: StopReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverOptions {
    pub max_generations: Option<u64>,
    pub frame_delay: Duration,
    pub detect_cycles: bool,
    pub cycle_history: usize,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            max_generations: None,
            frame_delay: Duration::ZERO,
            detect_cycles: false,
            cycle_history: 64,
        }
    }
}

impl From<&SimulationConfig> for DriverOptions {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            max_generations: config.max_generations,
            frame_delay: Duration::from_millis(config.frame_delay_ms),
            detect_cycles: config.detect_cycles,
            cycle_history: config.cycle_history,
        }
    }
}

/// Remembers the last few frames to spot still lifes and oscillators
#[derive(Debug, Clone)]
pub struct CycleDetector {
    capacity: usize,
    frames: VecDeque<(u64, u64, GridView)>,
}

impl CycleDetector {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            frames: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    /// Record the frame for `generation`; returns the period if it was seen before
    pub fn observe(&mut self, frame: &GridView, generation: u64) -> Option<u64> {
        let hash = Self::hash_frame(frame);

        let repeat = self
            .frames
            .iter()
            .find(|(h, _, seen)| *h == hash && seen == frame)
            .map(|&(_, seen_at, _)| generation - seen_at);
        if repeat.is_some() {
            return repeat;
        }

        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back((hash, generation, frame.clone()));
        None
    }

    fn hash_frame(frame: &GridView) -> u64 {
        let mut hasher = DefaultHasher::new();
        frame.hash(&mut hasher);
        hasher.finish()
    }
}

/// Resolve the configured seed into live coordinates, offsets applied
pub fn resolve_seed(input: &InputConfig) -> Result<Vec<(usize, usize)>> {
    let placed = if let Some(ref file) = input.pattern_file {
        load_pattern_file(file)?.placed(input.row_offset, input.col_offset)
    } else {
        let name = input
            .pattern
            .as_deref()
            .context("No seed given: set input.pattern or input.pattern_file")?;
        let pattern = find_pattern(name).with_context(|| format!("Unknown pattern: {}", name))?;
        pattern.placed(input.row_offset, input.col_offset)
    };

    placed.with_context(|| {
        format!(
            "Seed offset ({}, {}) overflows the coordinate range",
            input.row_offset, input.col_offset
        )
    })
}

/// Runs one engine until it dies out or a configured stop condition hits
#[derive(Debug)]
pub struct Driver {
    engine: LifeEngine,
    options: DriverOptions,
}

impl Driver {
    pub fn new(engine: LifeEngine, options: DriverOptions) -> Self {
        Self { engine, options }
    }

    /// Build the engine described by `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let seed = resolve_seed(&settings.input)?;
        let engine = LifeEngine::new(settings.simulation.rows, settings.simulation.cols, seed)
            .context("Failed to seed the life engine")?;

        Ok(Self::new(engine, DriverOptions::from(&settings.simulation)))
    }

    pub fn engine(&self) -> &LifeEngine {
        &self.engine
    }

    /// Drive the loop, calling `on_frame` with every rendered snapshot
    pub fn run<F>(&mut self, mut on_frame: F) -> Result<RunSummary>
    where
        F: FnMut(&GridView, &LifeEngine) -> Result<()>,
    {
        let mut detector = self
            .options
            .detect_cycles
            .then(|| CycleDetector::new(self.options.cycle_history));

        debug!(
            rows = self.engine.rows(),
            cols = self.engine.cols(),
            population = self.engine.population_count(),
            "starting run"
        );

        let outcome = loop {
            if self.engine.population_count() == 0 {
                break StopReason::Extinct;
            }

            if let Some(max) = self.options.max_generations {
                if self.engine.generation() >= max {
                    break StopReason::GenerationLimit;
                }
            }

            let frame = self.engine.snapshot();
            if let Some(ref mut detector) = detector {
                if let Some(period) = detector.observe(&frame, self.engine.generation()) {
                    break StopReason::Cycle { period };
                }
            }

            on_frame(&frame, &self.engine)?;

            if !self.options.frame_delay.is_zero() {
                std::thread::sleep(self.options.frame_delay);
            }
            self.engine.advance();
        };

        let summary = RunSummary {
            generations: self.engine.generation(),
            final_population: self.engine.population_count(),
            outcome,
        };
        info!(
            generations = summary.generations,
            population = summary.final_population,
            outcome = ?summary.outcome,
            "run finished"
        );

        Ok(summary)
    }

    /// Advance `generations` times without rendering
    pub fn step(&mut self, generations: u64) -> &LifeEngine {
        for _ in 0..generations {
            self.engine.advance();
        }
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(rows: usize, cols: usize, cells: &[(usize, usize)]) -> LifeEngine {
        LifeEngine::new(rows, cols, cells.iter().copied()).unwrap()
    }

    #[test]
    fn test_runs_until_extinct() {
        let mut driver = Driver::new(engine(5, 5, &[(0, 0), (4, 4)]), DriverOptions::default());
        let mut frames = 0;
        let summary = driver
            .run(|_, _| {
                frames += 1;
                Ok(())
            })
            .unwrap();

        assert_eq!(summary.outcome, StopReason::Extinct);
        assert_eq!(summary.generations, 1);
        assert_eq!(summary.final_population, 0);
        assert_eq!(frames, 1);
    }

    #[test]
    fn test_generation_limit() {
        let options = DriverOptions {
            max_generations: Some(3),
            ..DriverOptions::default()
        };
        let mut driver = Driver::new(engine(10, 10, &[(4, 4), (4, 5), (5, 4), (5, 5)]), options);
        let summary = driver.run(|_, _| Ok(())).unwrap();

        assert_eq!(summary.outcome, StopReason::GenerationLimit);
        assert_eq!(summary.generations, 3);
        assert_eq!(summary.final_population, 4);
    }

    #[test]
    fn test_detects_still_life_and_oscillator() {
        let options = DriverOptions {
            detect_cycles: true,
            ..DriverOptions::default()
        };

        let block_cells = [(4, 4), (4, 5), (5, 4), (5, 5)];
        let mut block = Driver::new(engine(10, 10, &block_cells), options.clone());
        let summary = block.run(|_, _| Ok(())).unwrap();
        assert_eq!(summary.outcome, StopReason::Cycle { period: 1 });

        let mut blinker = Driver::new(engine(11, 11, &[(5, 4), (5, 5), (5, 6)]), options);
        let summary = blinker.run(|_, _| Ok(())).unwrap();
        assert_eq!(summary.outcome, StopReason::Cycle { period: 2 });
        assert_eq!(summary.generations, 2);
    }

    #[test]
    fn test_frame_callback_error_stops_run() {
        let mut driver = Driver::new(
            engine(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]),
            DriverOptions::default(),
        );
        let result = driver.run(|_, _| anyhow::bail!("terminal closed"));
        assert!(result.is_err());
        assert_eq!(driver.engine().generation(), 0);
    }

    #[test]
    fn test_cycle_detector_forgets_old_frames() {
        let mut detector = CycleDetector::new(1);
        let a = GridView::new(2, 2);
        let mut b = GridView::new(2, 2);
        b.set(0, 0, true).unwrap();

        assert_eq!(detector.observe(&a, 0), None);
        assert_eq!(detector.observe(&b, 1), None);
        // `a` was evicted
        assert_eq!(detector.observe(&a, 2), None);
        assert_eq!(detector.observe(&a, 3), Some(1));
    }

    #[test]
    fn test_from_settings() {
        let driver = Driver::from_settings(&Settings::default()).unwrap();
        assert_eq!(driver.engine().population_count(), 10);
        assert_eq!(driver.engine().rows(), 30);

        let mut settings = Settings::default();
        settings.input.pattern = Some("blinker".to_string());
        settings.input.row_offset = 29;
        settings.input.col_offset = 0;
        // the blinker would land on row 29 of 30, inside the grid
        assert!(Driver::from_settings(&settings).is_ok());
        settings.input.row_offset = 30;
        assert!(Driver::from_settings(&settings).is_err());
    }

    #[test]
    fn test_overflowing_offset_is_rejected() {
        let mut settings = Settings::default();
        settings.input.pattern = Some("blinker".to_string());
        settings.input.col_offset = usize::MAX;
        settings.validate().unwrap();

        let err = Driver::from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("overflows"));

        settings.input.col_offset = 0;
        settings.input.row_offset = usize::MAX;
        assert!(resolve_seed(&settings.input).is_ok());
        // lands far outside the 30x40 grid
        assert!(Driver::from_settings(&settings).is_err());
    }

    #[test]
    fn test_step() {
        let mut driver = Driver::new(
            engine(11, 11, &[(5, 4), (5, 5), (5, 6)]),
            DriverOptions::default(),
        );
        let engine = driver.step(3);
        assert_eq!(engine.generation(), 3);
        assert_eq!(engine.live_cells(), vec![(4, 5), (5, 5), (6, 5)]);
    }
}
