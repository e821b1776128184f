//! Keyboard intent translation
//!
//! Maps browser key names to engine commands. Arrow keys and WASD steer, `p`
//! toggles pause, everything else is ignored.

use crate::sim::{Direction, GameEngine, GameStatus, RandomSource};

/// A command derived from one key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
}

impl Command {
    /// Decode a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        let command = match key {
            "ArrowUp" | "w" | "W" => Command::Turn(Direction::Up),
            "ArrowDown" | "s" | "S" => Command::Turn(Direction::Down),
            "ArrowLeft" | "a" | "A" => Command::Turn(Direction::Left),
            "ArrowRight" | "d" | "D" => Command::Turn(Direction::Right),
            "p" | "P" => Command::TogglePause,
            _ => return None,
        };
        Some(command)
    }
}

/// Receiver of translated commands
pub trait CommandSink {
    /// Direction the last tick applied
    fn committed_direction(&self) -> Direction;
    /// Returns whether the request was taken
    fn set_direction(&mut self, direction: Direction) -> bool;
    fn toggle_pause(&mut self) -> GameStatus;
}

impl<R: RandomSource> CommandSink for GameEngine<R> {
    fn committed_direction(&self) -> Direction {
        self.direction()
    }

    fn set_direction(&mut self, direction: Direction) -> bool {
        GameEngine::set_direction(self, direction)
    }

    fn toggle_pause(&mut self) -> GameStatus {
        GameEngine::toggle_pause(self)
    }
}

/// Forwards key presses to a [`CommandSink`]
#[derive(Debug, Clone, Default)]
pub struct InputTranslator {
    last_direction: Option<Direction>,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last direction actually handed to the sink
    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    /// Translate `key` and apply it to `sink`.
    ///
    /// Returns the command that was dispatched, or `None` when the key is
    /// unmapped or the turn would reverse the snake.
    pub fn dispatch<S: CommandSink + ?Sized>(&mut self, sink: &mut S, key: &str) -> Option<Command> {
        let command = Command::from_key(key)?;
        match command {
            Command::Turn(direction) => {
                if direction == sink.committed_direction().opposite() {
                    log::trace!("Ignoring reversal key {}", key);
                    return None;
                }
                if !sink.set_direction(direction) {
                    return None;
                }
                self.last_direction = Some(direction);
            }
            Command::TogglePause => {
                let status = sink.toggle_pause();
                log::info!("Pause toggled, now {:?}", status);
            }
        }
        Some(command)
    }

    /// Forget the last dispatched direction (new episode)
    pub fn reset(&mut self) {
        self.last_direction = None;
    }
}
