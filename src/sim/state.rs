//! Game state and core simulation types
//!
//! Everything the presentation layer reads each frame lives here.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Direction};

/// Current phase of an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Snake advances every tick
    Running,
    /// Ticks are ignored until resumed
    Paused,
    /// Episode ended; only a restart leaves this state
    GameOver,
}

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Head left the grid
    Wall,
    /// Head ran into the body
    SelfCollision,
    /// Head ran into an obstacle
    Obstacle,
    /// No free cell is left for food
    BoardFilled,
}

/// Fire-and-forget signal emitted by a tick (at most one per tick)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Food was eaten; `score` is the new score
    Consumed { score: u32 },
    /// The episode just ended
    GameOver { score: u32, cause: GameOverCause },
}

/// What a board cell currently holds, in drawing priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Obstacle,
    Food,
    SnakeBody,
    SnakeHead,
}

/// Complete episode state (serializable snapshot)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Episode counter, bumped on every restart
    pub episode: u32,
    /// Board is `grid_size` x `grid_size`
    pub grid_size: u32,
    /// Body cells, head first
    pub snake: VecDeque<Cell>,
    /// Direction applied by the last tick
    pub direction: Direction,
    /// Direction the next tick will apply
    pub pending_direction: Direction,
    /// `None` only once the snake has filled the board
    pub food: Option<Cell>,
    /// Wall cells in generation order (may contain duplicates)
    pub obstacles: Vec<Cell>,
    pub score: u32,
    pub status: GameStatus,
    /// Ticks simulated this episode
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh running episode; food is placed separately
    pub fn new(
        episode: u32,
        grid_size: u32,
        snake: impl IntoIterator<Item = Cell>,
        direction: Direction,
        obstacles: Vec<Cell>,
    ) -> Self {
        Self {
            episode,
            grid_size,
            snake: snake.into_iter().collect(),
            direction,
            pending_direction: direction,
            food: None,
            obstacles,
            score: 0,
            status: GameStatus::Running,
            time_ticks: 0,
        }
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_snake(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    /// In bounds and not covered by the snake or an obstacle
    pub fn is_free(&self, cell: Cell) -> bool {
        cell.in_bounds(self.grid_size) && !self.is_snake(cell) && !self.is_obstacle(cell)
    }

    /// Every free cell in row-major order
    pub fn free_cells(&self) -> Vec<Cell> {
        let occupancy = self.occupancy();
        let n = self.grid_size as usize;
        occupancy
            .iter()
            .enumerate()
            .filter(|(_, kind)| matches!(kind, CellKind::Empty | CellKind::Food))
            .map(|(i, _)| Cell::new((i % n) as i32, (i / n) as i32))
            .collect()
    }

    /// Row-major occupancy map of the whole board, built in one pass
    pub fn occupancy(&self) -> Vec<CellKind> {
        let n = self.grid_size as usize;
        let mut kinds = vec![CellKind::Empty; n * n];
        let mut mark = |cell: Cell, kind: CellKind| {
            if cell.in_bounds(self.grid_size) {
                let slot = &mut kinds[cell.y as usize * n + cell.x as usize];
                if kind as u8 > *slot as u8 {
                    *slot = kind;
                }
            }
        };
        for &cell in &self.obstacles {
            mark(cell, CellKind::Obstacle);
        }
        if let Some(food) = self.food {
            mark(food, CellKind::Food);
        }
        for (i, &cell) in self.snake.iter().enumerate() {
            let kind = if i == 0 {
                CellKind::SnakeHead
            } else {
                CellKind::SnakeBody
            };
            mark(cell, kind);
        }
        kinds
    }
}
