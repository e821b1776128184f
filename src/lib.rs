//! Snake Arena - grid Snake with static obstacles
//!
//! Core modules:
//! - `sim`: Deterministic game engine (movement, collisions, food, obstacles)
//! - `input`: Key press to engine command translation
//! - `session`: Frame-driven tick scheduling around one engine
//! - `config`: Validated game configuration
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction
//! - `highscores`: Session best scores

pub mod config;
pub mod error;
pub mod highscores;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use config::GameConfig;
pub use error::ConfigError;
pub use highscores::HighScores;
pub use input::{Command, CommandSink, InputTranslator};
pub use session::Session;
pub use settings::Settings;
pub use sim::{Cell, Direction, GameEngine, GameEvent, GameState, GameStatus};

/// Game configuration constants
pub mod consts {
    /// Default board width and height in cells
    pub const GRID_SIZE: u32 = 20;
    /// Default number of wall segments per episode
    pub const OBSTACLE_COUNT: u32 = 5;
    /// Default milliseconds between ticks
    pub const TICK_PERIOD_MS: u32 = 150;
    /// Maximum ticks run for one frame before the backlog is dropped
    pub const MAX_CATCHUP_TICKS: u32 = 4;

    /// Starting body, head first, moving right
    pub const INITIAL_SNAKE: [(i32, i32); 3] = [(8, 8), (7, 8), (6, 8)];
    pub const MIN_SNAKE_LEN: usize = 3;

    /// Smallest board that fits the longest wall segment
    pub const MIN_GRID_SIZE: u32 = crate::sim::MAX_SEGMENT_LEN;
    pub const MAX_GRID_SIZE: u32 = 256;

    /// On-screen cell size in CSS pixels, and the gap between cells
    pub const CELL_PX: f32 = 20.0;
    pub const CELL_GAP_PX: f32 = 1.0;
}
