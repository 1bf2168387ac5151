use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::state::{Cell, CollisionType, EngineState, Status};

/// Read-only view of the engine handed to renderers and schedulers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Head first
    pub segments: Vec<Cell>,
    pub food: Option<Cell>,
    pub score: u32,
    /// Milliseconds until the host should tick again
    pub speed: u64,
    pub status: Status,
    pub heading: Direction,
    pub ticks: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collision: Option<CollisionType>,
}

impl EngineSnapshot {
    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn tail(&self) -> Cell {
        self.segments[self.segments.len() - 1]
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }
}

impl From<&EngineState> for EngineSnapshot {
    fn from(state: &EngineState) -> Self {
        Self {
            segments: state.segments.clone(),
            food: state.food,
            score: state.score,
            speed: state.speed,
            status: state.status,
            heading: state.heading,
            ticks: state.ticks,
            collision: state.collision,
        }
    }
}
