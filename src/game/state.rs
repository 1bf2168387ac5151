use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::direction::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }

    /// Move cell one step in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dcol, drow) = direction.delta();
        self.moved_by(dcol, drow)
    }

    pub fn manhattan_distance(&self, other: Cell) -> u32 {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }

    /// Check if the two cells share an edge
    pub fn is_adjacent(&self, other: Cell) -> bool {
        self.manhattan_distance(other) == 1
    }
}

/// Dimensions of the playing field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub width: usize,
    pub height: usize,
}

impl GridBounds {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Check if a cell is within `[0, width) x [0, height)`
    pub fn contains(&self, cell: Cell) -> bool {
        cell.col >= 0
            && (cell.col as usize) < self.width
            && cell.row >= 0
            && (cell.row as usize) < self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).map(move |col| Cell::new(col as i32, row as i32))
        })
    }
}

impl From<&EngineConfig> for GridBounds {
    fn from(config: &EngineConfig) -> Self {
        Self::new(config.grid_width, config.grid_height)
    }
}

/// Whether the simulation still accepts moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Running,
    GameOver,
    /// The snake fills the whole grid
    Won,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Running)
    }
}

/// Type of collision that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    /// Body segments, with head at index 0
    pub segments: Vec<Cell>,
    /// Direction applied on every tick
    pub heading: Direction,
    /// Turn requested for the next tick
    pub pending_intent: Option<Direction>,
    /// `None` only once the snake fills the grid
    pub food: Option<Cell>,
    pub score: u32,
    /// Milliseconds per tick
    pub speed: u64,
    pub status: Status,
    pub ticks: u64,
    pub collision: Option<CollisionType>,
}

impl EngineState {
    /// Fresh running state with the given chain and food
    pub fn new(segments: Vec<Cell>, heading: Direction, food: Cell, speed: u64) -> Self {
        Self {
            segments,
            heading,
            pending_intent: None,
            food: Some(food),
            score: 0,
            speed,
            status: Status::Running,
            ticks: 0,
            collision: None,
        }
    }

    /// Get the head cell
    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    /// Get the tail cell (last segment)
    pub fn tail(&self) -> Cell {
        self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for a state built by the engine
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check if a cell is occupied by the snake
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }
}

/// Lay out a chain of `length` cells horizontally centred, head on the right
pub fn centered_chain(config: &EngineConfig) -> Vec<Cell> {
    let tail_col = ((config.grid_width - config.initial_length) / 2) as i32;
    let head_col = tail_col + config.initial_length as i32 - 1;
    let row = (config.grid_height / 2) as i32;

    (0..config.initial_length as i32)
        .map(|i| Cell::new(head_col - i, row))
        .collect()
}
