use std::time::{Duration, Instant};

use crate::game::{EngineSnapshot, Status};

/// Per-session statistics shown by the terminal host
///
/// Kept in memory only; nothing is persisted between runs.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub games_won: u32,
    paused_at: Option<Instant>,
    paused_total: Duration,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            games_won: 0,
            paused_at: None,
            paused_total: Duration::ZERO,
        }
    }

    /// Refresh the play clock; time spent paused is not counted
    pub fn update(&mut self) {
        let now = self.paused_at.unwrap_or_else(Instant::now);
        self.elapsed_time = now
            .saturating_duration_since(self.start_time)
            .saturating_sub(self.paused_total);
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.paused_at = None;
        self.paused_total = Duration::ZERO;
    }

    pub fn on_pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(Instant::now());
        }
    }

    pub fn on_resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += paused_at.elapsed();
        }
    }

    /// Record a finished game; call once per terminal snapshot
    pub fn on_game_end(&mut self, snapshot: &EngineSnapshot) {
        self.update();
        self.games_played += 1;
        if snapshot.status == Status::Won {
            self.games_won += 1;
        }
        self.high_score = self.high_score.max(snapshot.score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction};

    fn finished(score: u32, status: Status) -> EngineSnapshot {
        EngineSnapshot {
            segments: vec![Cell::new(0, 0)],
            food: None,
            score,
            speed: 100,
            status,
            heading: Direction::Right,
            ticks: 10,
            collision: None,
        }
    }

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_end(&finished(10, Status::GameOver));
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_end(&finished(5, Status::GameOver));
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_end(&finished(15, Status::Won));
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.games_played, 3);
        assert_eq!(metrics.games_won, 1);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }

    #[test]
    fn test_paused_time_is_excluded() {
        let mut metrics = GameMetrics::new();
        metrics.on_pause();
        std::thread::sleep(Duration::from_millis(60));
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 30);

        metrics.on_resume();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 30);
    }
}
