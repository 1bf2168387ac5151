//! Core simulation for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Hosts drive it by pushing intents and calling `tick` on their own schedule.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod food;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use config::EngineConfig;
pub use direction::Direction;
pub use engine::Engine;
pub use error::{ConfigError, EngineError, NoSpaceError};
pub use food::{FoodPlacer, RandomFoodPlacer};
pub use snapshot::EngineSnapshot;
pub use state::{Cell, CollisionType, EngineState, GridBounds, Status};
