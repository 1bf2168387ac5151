use thiserror::Error;

/// Rejected engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must be at least {min}x{min}, got {width}x{height}")]
    GridTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },
    #[error("grid {width}x{height} exceeds the limit of {max_cells} cells")]
    GridTooLarge {
        width: usize,
        height: usize,
        max_cells: usize,
    },
    #[error("initial_length must be at least 1")]
    EmptySnake,
    #[error("initial_length {length} does not fit in a row of width {width}")]
    SnakeTooLong { length: usize, width: usize },
    #[error("a {width}x{height} grid has no free cell left for a snake of length {length}")]
    NoFreeCell {
        width: usize,
        height: usize,
        length: usize,
    },
    #[error("initial_speed_ms must be positive")]
    ZeroSpeed,
    #[error("speed_floor_ms must be in [1, {initial}], got {floor}")]
    InvalidSpeedFloor { floor: u64, initial: u64 },
    #[error("snapshot is inconsistent: {0}")]
    InconsistentState(String),
}

/// Every cell of the grid is occupied, so food cannot be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no free cell on a {width}x{height} grid")]
pub struct NoSpaceError {
    pub width: usize,
    pub height: usize,
}

/// Errors reported synchronously by [`crate::game::Engine`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    NoSpace(#[from] NoSpaceError),
}
