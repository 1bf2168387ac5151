use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::game::{Engine, EngineConfig, EngineSnapshot};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Keyboard-driven game in the terminal
///
/// Owns the engine and serializes every intent and tick through one
/// `select!` loop, so the engine is never touched concurrently.
pub struct HumanMode {
    engine: Engine,
    config: EngineConfig,
    snapshot: EngineSnapshot,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    paused: bool,
}

impl HumanMode {
    pub fn new(config: EngineConfig, seed: Option<u64>) -> Result<Self> {
        let engine = match seed {
            Some(seed) => Engine::seeded(config.clone(), seed),
            None => Engine::new(config.clone()),
        }
        .context("Failed to start game")?;
        let snapshot = engine.snapshot();

        Ok(Self {
            engine,
            config,
            snapshot,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            paused: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        // Restore the terminal even when the loop failed
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = tick_interval(self.snapshot.speed);

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, &mut tick_timer)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused && self.snapshot.is_running() {
                        self.update_game(&mut tick_timer);
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    let bounds = self.engine.bounds();
                    terminal
                        .draw(|frame| {
                            self.renderer.render(
                                frame,
                                &self.snapshot,
                                bounds,
                                &self.metrics,
                                self.paused,
                            );
                        })
                        .context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            games = self.metrics.games_played,
            high_score = self.metrics.high_score,
            "session finished"
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply_action(action, tick_timer)?;
        }

        Ok(())
    }

    fn apply_action(&mut self, action: KeyAction, tick_timer: &mut Interval) -> Result<()> {
        match action {
            KeyAction::Turn(direction) => {
                if !self.paused {
                    self.engine.set_intent(direction);
                }
            }
            KeyAction::TogglePause => self.toggle_pause(),
            KeyAction::Restart => {
                self.reset_game()?;
                *tick_timer = tick_interval(self.snapshot.speed);
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }

        Ok(())
    }

    fn update_game(&mut self, tick_timer: &mut Interval) {
        let previous_speed = self.snapshot.speed;
        self.snapshot = self.engine.tick();

        // The engine only reports the pace; rescheduling is on us
        if self.snapshot.speed != previous_speed {
            debug!(speed = self.snapshot.speed, "tick interval changed");
            *tick_timer = tick_interval(self.snapshot.speed);
        }

        if !self.snapshot.is_running() {
            self.metrics.on_game_end(&self.snapshot);
        }
    }

    fn toggle_pause(&mut self) {
        if !self.snapshot.is_running() {
            return;
        }

        self.paused = !self.paused;
        if self.paused {
            self.metrics.on_pause();
        } else {
            self.metrics.on_resume();
        }
    }

    fn reset_game(&mut self) -> Result<()> {
        self.snapshot = self
            .engine
            .reset(self.config.clone())
            .context("Failed to restart game")?;
        self.metrics.on_game_start();
        self.paused = false;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Timer firing every `speed_ms`, starting one period from now
fn tick_interval(speed_ms: u64) -> Interval {
    let period = Duration::from_millis(speed_ms);
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Status};

    #[tokio::test]
    async fn test_game_initialization() {
        let mode = HumanMode::new(EngineConfig::default(), Some(1)).unwrap();
        assert!(mode.snapshot.is_running());
        assert_eq!(mode.snapshot.score, 0);
        assert!(!mode.paused);
    }

    #[tokio::test]
    async fn test_game_reset() {
        let mut mode = HumanMode::new(EngineConfig::small(), Some(1)).unwrap();
        let mut timer = tick_interval(mode.snapshot.speed);

        mode.apply_action(KeyAction::Turn(Direction::Up), &mut timer).unwrap();
        while mode.snapshot.is_running() {
            mode.update_game(&mut timer);
        }
        assert_eq!(mode.snapshot.status, Status::GameOver);
        assert_eq!(mode.metrics.games_played, 1);

        mode.apply_action(KeyAction::Restart, &mut timer).unwrap();
        assert!(mode.snapshot.is_running());
        assert_eq!(mode.snapshot.score, 0);
        assert_eq!(mode.snapshot.heading, Direction::Right);
    }

    #[tokio::test]
    async fn test_pause_blocks_turns() {
        let mut mode = HumanMode::new(EngineConfig::small(), Some(2)).unwrap();
        let mut timer = tick_interval(mode.snapshot.speed);

        mode.apply_action(KeyAction::TogglePause, &mut timer).unwrap();
        assert!(mode.paused);
        mode.apply_action(KeyAction::Turn(Direction::Up), &mut timer).unwrap();
        assert_eq!(mode.engine.state().pending_intent, None);

        mode.apply_action(KeyAction::TogglePause, &mut timer).unwrap();
        assert!(!mode.paused);
        mode.apply_action(KeyAction::Quit, &mut timer).unwrap();
        assert!(mode.should_quit);
    }
}
