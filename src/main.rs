use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::EngineConfig;
use grid_snake::modes::{AutopilotConfig, AutopilotMode, HumanMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Tick-driven Snake on a fixed grid")]
struct Cli {
    /// Who plays
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON file with an engine configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Segments the snake starts with
    #[arg(long)]
    initial_length: Option<usize>,

    /// Starting tick interval in milliseconds
    #[arg(long)]
    speed: Option<u64>,

    /// Fastest tick interval in milliseconds
    #[arg(long)]
    speed_floor: Option<u64>,

    /// Tick interval reduction per food, in milliseconds
    #[arg(long)]
    speed_step: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (human mode draws on the terminal)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Tick budget for autopilot
    #[arg(long, default_value = "10000")]
    max_ticks: u64,

    /// Make autopilot wait `speed` milliseconds between ticks
    #[arg(long)]
    realtime: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Let a greedy policy play headless and print the final snapshot
    Autopilot,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let config = build_config(&cli)?;

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config, cli.seed)?;
            human_mode.run().await?;
        }
        Mode::Autopilot => {
            let autopilot_config = AutopilotConfig {
                seed: cli.seed,
                max_ticks: cli.max_ticks,
                realtime: cli.realtime,
                ..AutopilotConfig::new(config)
            };
            let mut autopilot = AutopilotMode::new(autopilot_config)?;
            let snapshot = autopilot.run().await?;
            let json =
                serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?;
            println!("{json}");
        }
    }

    Ok(())
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (&cli.log, &cli.mode) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        // stderr belongs to the TUI
        (None, Mode::Human) => {}
        (None, Mode::Autopilot) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .try_init();
        }
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };

    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    if let Some(length) = cli.initial_length {
        config.initial_length = length;
    }
    if let Some(speed) = cli.speed {
        config.initial_speed_ms = speed;
    }
    if let Some(floor) = cli.speed_floor {
        config.speed_floor_ms = floor;
    }
    if let Some(step) = cli.speed_step {
        config.speed_step_ms = step;
    }

    config.validate().context("Invalid game configuration")?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<EngineConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
