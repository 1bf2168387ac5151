use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Smallest accepted grid side
pub const MIN_GRID_SIDE: usize = 5;

/// Largest grid side; cells use `i32` coordinates
pub const MAX_GRID_SIDE: usize = i32::MAX as usize;

/// Largest grid area; food placement walks every cell on growth
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Configuration consumed by [`crate::game::Engine::reset`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Number of segments the snake starts with
    pub initial_length: usize,

    // Pacing, in milliseconds per tick
    /// Tick interval at the start of a game
    pub initial_speed_ms: u64,
    /// Fastest tick interval the game accelerates to
    pub speed_floor_ms: u64,
    /// Interval reduction applied per food eaten
    pub speed_step_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_length: 4,
            initial_speed_ms: 150,
            speed_floor_ms: 50,
            speed_step_ms: 5,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30, 30)
    }

    /// `None` when the area does not fit in `usize`
    pub fn cell_count(&self) -> Option<usize> {
        self.grid_width.checked_mul(self.grid_height)
    }

    /// Check that a game can be started with these parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < MIN_GRID_SIDE || self.grid_height < MIN_GRID_SIDE {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
                min: MIN_GRID_SIDE,
            });
        }

        let cells = match self.cell_count() {
            Some(cells)
                if cells <= MAX_GRID_CELLS
                    && self.grid_width <= MAX_GRID_SIDE
                    && self.grid_height <= MAX_GRID_SIDE =>
            {
                cells
            }
            _ => {
                return Err(ConfigError::GridTooLarge {
                    width: self.grid_width,
                    height: self.grid_height,
                    max_cells: MAX_GRID_CELLS,
                })
            }
        };

        if self.initial_length == 0 {
            return Err(ConfigError::EmptySnake);
        }

        if self.initial_length > self.grid_width {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_length,
                width: self.grid_width,
            });
        }

        if cells <= self.initial_length {
            return Err(ConfigError::NoFreeCell {
                width: self.grid_width,
                height: self.grid_height,
                length: self.initial_length,
            });
        }

        if self.initial_speed_ms == 0 {
            return Err(ConfigError::ZeroSpeed);
        }

        if self.speed_floor_ms == 0 || self.speed_floor_ms > self.initial_speed_ms {
            return Err(ConfigError::InvalidSpeedFloor {
                floor: self.speed_floor_ms,
                initial: self.initial_speed_ms,
            });
        }

        Ok(())
    }

    /// Tick interval after one more food, never below the floor
    pub fn next_speed(&self, speed: u64) -> u64 {
        speed
            .saturating_sub(self.speed_step_ms)
            .max(self.speed_floor_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_length, 4);
        assert_eq!(config.initial_speed_ms, 150);
        assert_eq!(config.speed_floor_ms, 50);
        assert_eq!(config.speed_step_ms, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = EngineConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.initial_length, 4);
    }

    #[test]
    fn test_rejects_small_grid() {
        let config = EngineConfig::new(4, 10);
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooSmall {
                width: 4,
                height: 10,
                min: 5
            })
        );
    }

    #[test]
    fn test_rejects_overflowing_grid() {
        let config = EngineConfig::new(usize::MAX, 5);
        assert_eq!(config.cell_count(), None);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooLarge { width: usize::MAX, height: 5, .. })
        ));
    }

    #[test]
    fn test_rejects_side_beyond_cell_coordinates() {
        let config = EngineConfig::new((1usize << 32) + 5, 5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_grid_area_cap() {
        let config = EngineConfig::new(1024, 1024);
        assert_eq!(config.cell_count(), Some(MAX_GRID_CELLS));
        assert!(config.validate().is_ok());

        let config = EngineConfig::new(1025, 1024);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooLarge { max_cells: MAX_GRID_CELLS, .. })
        ));
    }

    #[test]
    fn test_rejects_snake_wider_than_grid() {
        let config = EngineConfig {
            initial_length: 6,
            ..EngineConfig::new(5, 5)
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SnakeTooLong { length: 6, width: 5 })
        ));
    }

    #[test]
    fn test_rejects_empty_snake() {
        let config = EngineConfig {
            initial_length: 0,
            ..EngineConfig::small()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptySnake));
    }

    #[test]
    fn test_rejects_bad_speed_floor() {
        let config = EngineConfig {
            speed_floor_ms: 200,
            ..EngineConfig::small()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSpeedFloor { floor: 200, initial: 150 })
        ));

        let config = EngineConfig {
            speed_floor_ms: 0,
            ..EngineConfig::small()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            initial_speed_ms: 0,
            speed_floor_ms: 0,
            ..EngineConfig::small()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSpeed));
    }

    #[test]
    fn test_next_speed_respects_floor() {
        let config = EngineConfig::default();
        assert_eq!(config.next_speed(150), 145);
        assert_eq!(config.next_speed(53), 50);
        assert_eq!(config.next_speed(50), 50);

        let config = EngineConfig {
            speed_step_ms: 500,
            ..EngineConfig::default()
        };
        assert_eq!(config.next_speed(150), 50);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"grid_width": 12, "speed_step_ms": 0}"#).unwrap();
        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.speed_step_ms, 0);
    }
}
