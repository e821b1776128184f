//! Frame-driven play session
//!
//! Ties an engine to its tick clock, key translation and the session
//! leaderboard. Front ends hand it key names and elapsed frame time; it runs
//! whatever ticks fell due, one after another, and reports what happened.

use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::highscores::HighScores;
use crate::input::{Command, InputTranslator};
use crate::platform;
use crate::sim::{Direction, GameEngine, GameEvent, GameState, GameStatus, RandomSource, TickClock};

/// An engine plus everything needed to drive it from animation frames
#[derive(Debug, Clone)]
pub struct Session<R = Pcg32> {
    engine: GameEngine<R>,
    clock: TickClock,
    input: InputTranslator,
    high_scores: HighScores,
    /// Last finished episode set a new session best
    new_best: bool,
}

impl Session<Pcg32> {
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self::new(GameEngine::seeded(config, seed)?))
    }
}

impl<R: RandomSource> Session<R> {
    /// Wrap `engine` and start its tick stream
    pub fn new(engine: GameEngine<R>) -> Self {
        let mut clock = TickClock::new(engine.config().tick_period_ms);
        clock.start();
        Self {
            engine,
            clock,
            input: InputTranslator::new(),
            high_scores: HighScores::new(),
            new_best: false,
        }
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn new_best(&self) -> bool {
        self.new_best
    }

    /// Heading most recently accepted from the keyboard, for the HUD
    pub fn last_direction(&self) -> Option<Direction> {
        self.input.last_direction()
    }

    /// Translate and apply one key press
    pub fn handle_key(&mut self, key: &str) -> Option<Command> {
        self.input.dispatch(&mut self.engine, key)
    }

    /// Pause if the game is running. Returns whether it paused.
    pub fn pause(&mut self) -> bool {
        if self.engine.status() != GameStatus::Running {
            return false;
        }
        self.engine.toggle_pause();
        true
    }

    /// Feed one frame's elapsed time and run the ticks that fell due.
    ///
    /// The clock stops on game over, so later frames run nothing until
    /// [`Session::restart`].
    pub fn frame(&mut self, elapsed_ms: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..self.clock.advance(elapsed_ms) {
            if let Some(event) = self.engine.tick() {
                if let GameEvent::GameOver { score, cause } = event {
                    self.new_best = self.high_scores.is_new_best(score);
                    self.high_scores
                        .add_score(score, self.engine.state().snake_len(), platform::now_ms());
                    log::info!(
                        "Game over ({:?}): score {}, best {}",
                        cause,
                        score,
                        self.high_scores.best()
                    );
                }
                events.push(event);
            }
            if self.engine.status() == GameStatus::GameOver {
                self.clock.stop();
                break;
            }
        }
        events
    }

    /// Stop the current tick stream, then start the next episode on a fresh one
    pub fn restart(&mut self) {
        self.clock.stop();
        self.engine.restart();
        self.input.reset();
        self.new_best = false;
        self.clock.start();
        log::info!("Game restarted (episode {})", self.engine.state().episode);
    }
}
