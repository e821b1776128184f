//! Game configuration
//!
//! Board size, obstacle count, tick rate and the starting layout. Loaded from
//! defaults, a JSON document, or a page URL query string, and always
//! validated before an engine is built from it.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::MAX_SEGMENT_LEN;
use crate::sim::{Cell, Direction};

/// Parameters for one engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board is `grid_size` x `grid_size`
    pub grid_size: u32,
    /// Number of wall segments generated per episode
    pub obstacle_count: u32,
    /// Milliseconds between ticks
    pub tick_period_ms: u32,
    /// Starting body, head first
    pub initial_snake: Vec<Cell>,
    pub initial_direction: Direction,
    /// Fixed first food cell; ignored when it is not free
    pub initial_food: Option<Cell>,
    /// Seed for the default generator; `None` picks one per session
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            obstacle_count: OBSTACLE_COUNT,
            tick_period_ms: TICK_PERIOD_MS,
            initial_snake: INITIAL_SNAKE
                .iter()
                .map(|&(x, y)| Cell::new(x, y))
                .collect(),
            initial_direction: Direction::Right,
            initial_food: None,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a URL query string such as
    /// `?grid=24&obstacles=8&tick=120&seed=7&dir=up`. Unknown keys are ignored.
    pub fn from_query(query: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let invalid = || ConfigError::InvalidParameter {
                key: key.to_string(),
                value: value.to_string(),
            };
            match key {
                "grid" => config.grid_size = value.parse().map_err(|_| invalid())?,
                "obstacles" => config.obstacle_count = value.parse().map_err(|_| invalid())?,
                "tick" => config.tick_period_ms = value.parse().map_err(|_| invalid())?,
                "seed" => config.seed = Some(value.parse().map_err(|_| invalid())?),
                "dir" => config.initial_direction = Direction::from_str(value).ok_or_else(invalid)?,
                _ => log::debug!("Ignoring unknown config parameter `{}`", key),
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot start an episode or that could
    /// leave no free cell for the first food
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                size: self.grid_size,
                min: MIN_GRID_SIZE,
            });
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                size: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }

        let snake = &self.initial_snake;
        if snake.len() < MIN_SNAKE_LEN {
            return Err(ConfigError::SnakeTooShort {
                len: snake.len(),
                min: MIN_SNAKE_LEN,
            });
        }
        for (i, &cell) in snake.iter().enumerate() {
            if !cell.in_bounds(self.grid_size) {
                return Err(ConfigError::SnakeOutOfBounds { cell });
            }
            if snake[..i].contains(&cell) {
                return Err(ConfigError::SnakeOverlaps { cell });
            }
        }
        if let Some(index) = snake.windows(2).position(|w| !w[0].is_adjacent(w[1])) {
            return Err(ConfigError::SnakeNotContiguous { index });
        }
        if snake[0].step(self.initial_direction) == snake[1] {
            return Err(ConfigError::ReversedStart {
                direction: self.initial_direction,
            });
        }

        let available = self.grid_size as u64 * self.grid_size as u64;
        let required =
            snake.len() as u64 + self.obstacle_count as u64 * MAX_SEGMENT_LEN as u64;
        if required >= available {
            return Err(ConfigError::Overcrowded {
                required,
                available,
            });
        }

        Ok(())
    }
}
