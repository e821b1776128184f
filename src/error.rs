//! Configuration errors

use thiserror::Error;

use crate::sim::{Cell, Direction};

/// A game configuration that cannot produce a playable episode
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size {size} is below the minimum of {min}")]
    GridTooSmall { size: u32, min: u32 },

    #[error("grid size {size} exceeds the maximum of {max}")]
    GridTooLarge { size: u32, max: u32 },

    #[error("initial snake has {len} cells, at least {min} are required")]
    SnakeTooShort { len: usize, min: usize },

    #[error("initial snake cell ({}, {}) lies outside the grid", .cell.x, .cell.y)]
    SnakeOutOfBounds { cell: Cell },

    #[error("initial snake is broken between segments {index} and {}", .index + 1)]
    SnakeNotContiguous { index: usize },

    #[error("initial snake covers ({}, {}) more than once", .cell.x, .cell.y)]
    SnakeOverlaps { cell: Cell },

    #[error("initial direction {direction:?} points back into the snake's neck")]
    ReversedStart { direction: Direction },

    #[error("grid has {available} cells but snake and obstacles may need {required}")]
    Overcrowded { required: u64, available: u64 },

    #[error("tick period must be at least 1 ms")]
    ZeroTickPeriod,

    #[error("invalid value {value:?} for config parameter `{key}`")]
    InvalidParameter { key: String, value: String },

    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
