//! Command line driver for the incremental Game of Life engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_engine::{
    config::{CliOverrides, OutputFormat, Settings},
    driver::Driver,
    game_of_life::{create_example_patterns, PATTERNS},
    run_simulation,
    utils::{ColorOutput, FrameFormatter, CLEAR_SCREEN},
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "life_engine")]
#[command(about = "Incremental Conway's Game of Life simulator")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Seed and grid overrides shared by `run` and `step`
#[derive(clap::Args, Debug, Default)]
struct SeedArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Built-in pattern name (overrides config)
    #[arg(short, long, conflicts_with = "file")]
    pattern: Option<String>,

    /// Pattern file (overrides config)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Grid rows (overrides config)
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns (overrides config)
    #[arg(long)]
    cols: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate a simulation in the terminal
    Run {
        #[command(flatten)]
        seed: SeedArgs,

        /// Stop after this many generations (overrides config)
        #[arg(short, long)]
        generations: Option<u64>,

        /// Delay between frames in milliseconds (overrides config)
        #[arg(short, long)]
        delay: Option<u64>,

        /// Stop when the grid settles into a still life or oscillator
        #[arg(long)]
        detect_cycles: bool,
    },

    /// Advance a number of generations and print the final frame
    Step {
        #[command(flatten)]
        seed: SeedArgs,

        /// Generations to advance
        #[arg(short, long, default_value_t = 1)]
        generations: u64,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// List built-in patterns
    Patterns,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run {
            seed,
            generations,
            delay,
            detect_cycles,
        } => run_command(seed, generations, delay, detect_cycles),
        Commands::Step { seed, generations } => step_command(seed, generations),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Patterns => patterns_command(),
    }
}

/// Load the config file if present and apply command line overrides
fn load_settings(seed: SeedArgs, overrides: CliOverrides) -> Result<Settings> {
    let mut settings = if seed.config.exists() {
        Settings::from_file(&seed.config)
            .with_context(|| format!("Failed to load config from {}", seed.config.display()))?
    } else {
        warn!("Config file {} not found, using defaults", seed.config.display());
        Settings::default()
    };

    settings.merge_with_cli(&CliOverrides {
        rows: seed.rows,
        cols: seed.cols,
        pattern: seed.pattern,
        pattern_file: seed.file,
        ..overrides
    });
    settings.validate().context("Configuration validation failed")?;

    Ok(settings)
}

fn run_command(
    seed: SeedArgs,
    generations: Option<u64>,
    delay: Option<u64>,
    detect_cycles: bool,
) -> Result<()> {
    let settings = load_settings(
        seed,
        CliOverrides {
            max_generations: generations,
            frame_delay_ms: delay,
            detect_cycles,
            ..CliOverrides::default()
        },
    )?;

    let output = settings.output.clone();
    let clear = output.clear_screen && output.format != OutputFormat::Json;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let summary = run_simulation(&settings, |frame, engine| {
        if clear {
            write!(out, "{}", CLEAR_SCREEN)?;
        }
        write!(out, "{}", FrameFormatter::format_frame(frame, &output)?)?;
        if output.show_stats {
            writeln!(
                out,
                "{}",
                FrameFormatter::format_status(
                    engine.generation(),
                    engine.population_count(),
                    engine.last_tick()
                )
            )?;
        }
        out.flush()?;
        Ok(())
    })
    .context("Simulation failed")?;
    drop(out);

    println!("{}", ColorOutput::success(&FrameFormatter::format_summary(&summary)));
    Ok(())
}

fn step_command(seed: SeedArgs, generations: u64) -> Result<()> {
    let settings = load_settings(seed, CliOverrides::default())?;
    let mut driver = Driver::from_settings(&settings)?;
    let engine = driver.step(generations);

    print!("{}", FrameFormatter::format_frame(&engine.snapshot(), &settings.output)?);
    if settings.output.format != OutputFormat::Json {
        println!(
            "{}",
            FrameFormatter::format_status(
                engine.generation(),
                engine.population_count(),
                engine.last_tick()
            )
        );
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let pattern_dir = directory.join("patterns");

    for dir in [&config_dir, &pattern_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    write_settings(&Settings::default(), &config_path, force)?;

    create_example_patterns(&pattern_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", pattern_dir.display());

    let examples_dir = config_dir.join("examples");

    let mut glider = Settings::default();
    glider.simulation.rows = 20;
    glider.simulation.cols = 20;
    glider.simulation.frame_delay_ms = 100;
    glider.input.pattern = None;
    glider.input.pattern_file = Some(pattern_dir.join("glider.txt"));
    glider.input.row_offset = 1;
    glider.input.col_offset = 1;
    write_settings(&glider, &examples_dir.join("glider.yaml"), force)?;

    let mut blinker = Settings::default();
    blinker.simulation.rows = 11;
    blinker.simulation.cols = 11;
    blinker.simulation.detect_cycles = true;
    blinker.input.pattern = Some("blinker".to_string());
    blinker.input.row_offset = 5;
    blinker.input.col_offset = 4;
    blinker.output.show_stats = true;
    write_settings(&blinker, &examples_dir.join("blinker.yaml"), force)?;

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your own patterns to {}", pattern_dir.display());
    println!("3. Run: cargo run -- run --config {}", config_path.display());

    Ok(())
}

fn write_settings(settings: &Settings, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Skipped: {} (already exists)", path.display());
        return Ok(());
    }
    settings
        .to_file(path)
        .with_context(|| format!("Failed to create configuration {}", path.display()))?;
    println!("Created: {}", path.display());
    Ok(())
}

fn patterns_command() -> Result<()> {
    println!("{:10} {:>7}  Description", "Name", "Size");
    for pattern in PATTERNS {
        let (rows, cols) = pattern.extent();
        println!(
            "{:10} {:>7}  {}",
            pattern.name,
            format!("{}x{}", rows, cols),
            pattern.description
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "life_engine",
            "run",
            "--config",
            "test.yaml",
            "--generations",
            "5",
            "--detect-cycles",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from([
            "life_engine", "step", "--pattern", "glider", "--file", "x.txt",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("patterns/glider.txt").exists());

        let glider_path = temp_dir.path().join("config/examples/glider.yaml");
        let glider = Settings::from_file(&glider_path).unwrap();
        let driver = Driver::from_settings(&glider).unwrap();
        assert_eq!(driver.engine().population_count(), 5);
    }

    #[test]
    fn test_load_settings_applies_overrides() {
        let temp_dir = tempdir().unwrap();
        let seed = SeedArgs {
            config: temp_dir.path().join("missing.yaml"),
            pattern: Some("block".to_string()),
            rows: Some(6),
            cols: Some(6),
            ..SeedArgs::default()
        };
        let settings = load_settings(
            seed,
            CliOverrides {
                max_generations: Some(2),
                ..CliOverrides::default()
            },
        )
        .unwrap();

        assert_eq!(settings.simulation.rows, 6);
        assert_eq!(settings.simulation.max_generations, Some(2));
        assert_eq!(settings.input.pattern.as_deref(), Some("block"));
    }

    #[test]
    fn test_overrides_repair_invalid_config() {
        let temp_dir = tempdir().unwrap();
        let config = temp_dir.path().join("broken.yaml");

        let mut broken = Settings::default();
        broken.simulation.rows = 0;
        broken.input.pattern = None;
        broken.input.pattern_file = Some(temp_dir.path().join("gone.txt"));
        broken.to_file(&config).unwrap();

        let seed = SeedArgs {
            config: config.clone(),
            ..SeedArgs::default()
        };
        assert!(load_settings(seed, CliOverrides::default()).is_err());

        let seed = SeedArgs {
            config,
            pattern: Some("glider".to_string()),
            rows: Some(12),
            ..SeedArgs::default()
        };
        let settings = load_settings(seed, CliOverrides::default()).unwrap();
        assert_eq!(settings.simulation.rows, 12);
        assert_eq!(settings.input.pattern_file, None);
        assert_eq!(Driver::from_settings(&settings).unwrap().engine().population_count(), 5);
    }
}
