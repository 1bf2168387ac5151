//! Headless mode where a greedy policy plays the game
//!
//! Useful for smoke-testing the engine from the command line and for
//! producing reproducible runs with `--seed`. The final snapshot is returned
//! to the caller, which prints it as JSON.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::game::{Cell, Direction, Engine, EngineConfig, EngineSnapshot, GridBounds};

/// Settings for a headless run
#[derive(Debug, Clone)]
pub struct AutopilotConfig {
    pub engine: EngineConfig,
    pub seed: Option<u64>,
    /// Stop after this many ticks even if the game is still running
    pub max_ticks: u64,
    /// Sleep `snapshot.speed` between ticks like an interactive host would
    pub realtime: bool,
    /// Log progress every N ticks
    pub log_frequency: u64,
}

impl AutopilotConfig {
    pub fn new(engine: EngineConfig) -> Self {
        Self {
            engine,
            seed: None,
            max_ticks: 10_000,
            realtime: false,
            log_frequency: 500,
        }
    }
}

pub struct AutopilotMode {
    engine: Engine,
    config: AutopilotConfig,
}

impl AutopilotMode {
    pub fn new(config: AutopilotConfig) -> Result<Self> {
        let engine = match config.seed {
            Some(seed) => Engine::seeded(config.engine.clone(), seed),
            None => Engine::new(config.engine.clone()),
        }
        .context("Failed to start game")?;

        Ok(Self { engine, config })
    }

    /// Play until the game ends or the tick budget runs out
    pub async fn run(&mut self) -> Result<EngineSnapshot> {
        let bounds = self.engine.bounds();
        let mut snapshot = self.engine.snapshot();

        info!(
            width = bounds.width,
            height = bounds.height,
            max_ticks = self.config.max_ticks,
            "autopilot started"
        );

        while snapshot.is_running() && snapshot.ticks < self.config.max_ticks {
            if let Some(direction) = choose_direction(&snapshot, bounds) {
                self.engine.set_intent(direction);
            }

            if self.config.realtime {
                tokio::time::sleep(Duration::from_millis(snapshot.speed)).await;
            }

            snapshot = self.engine.tick();

            if self.config.log_frequency > 0 && snapshot.ticks % self.config.log_frequency == 0 {
                debug!(
                    ticks = snapshot.ticks,
                    score = snapshot.score,
                    speed = snapshot.speed,
                    "autopilot progress"
                );
            }
        }

        info!(
            ticks = snapshot.ticks,
            score = snapshot.score,
            status = ?snapshot.status,
            "autopilot finished"
        );
        Ok(snapshot)
    }
}

/// Pick the safe move that gets closest to the food
///
/// A move is safe when it stays on the grid and does not hit the body on the
/// next tick. Ties keep the current heading. Returns `None` when every move
/// is fatal, leaving the heading as it is.
pub fn choose_direction(snapshot: &EngineSnapshot, bounds: GridBounds) -> Option<Direction> {
    let head = snapshot.head();
    let body: HashSet<Cell> = snapshot.segments.iter().copied().collect();
    let tail = snapshot.tail();

    let distance = |cell: Cell| {
        snapshot
            .food
            .map(|food| cell.manhattan_distance(food))
            .unwrap_or(0)
    };

    let is_safe = |cell: Cell| {
        if !bounds.contains(cell) {
            return false;
        }
        let grows = snapshot.food == Some(cell);
        !body.contains(&cell) || (cell == tail && !grows)
    };

    Direction::ALL
        .into_iter()
        .filter(|d| !snapshot.heading.is_opposite(*d))
        .map(|d| (d, head.moved_in_direction(d)))
        .filter(|&(_, cell)| is_safe(cell))
        .min_by_key(|&(d, cell)| (distance(cell), d != snapshot.heading))
        .map(|(d, _)| d)
}
