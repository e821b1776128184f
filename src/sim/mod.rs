//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform code:
//! - One cell of movement per tick
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (snake head first, obstacles in generation order)

pub mod cell;
pub mod clock;
pub mod engine;
pub mod obstacles;
pub mod rng;
pub mod state;
pub mod tick;

pub use cell::{Cell, Direction};
pub use clock::TickClock;
pub use engine::GameEngine;
pub use obstacles::{MAX_SEGMENT_LEN, MIN_SEGMENT_LEN, generate_obstacles};
pub use rng::{RandomSource, SequenceRng, seeded};
pub use state::{CellKind, GameEvent, GameOverCause, GameState, GameStatus};
pub use tick::{place_food, tick};
