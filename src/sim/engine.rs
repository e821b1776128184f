//! Game engine: owns one episode plus the configuration and random source
//! needed to start the next one.

use rand_pcg::Pcg32;

use super::cell::Direction;
use super::obstacles::generate_obstacles;
use super::rng::{RandomSource, seeded};
use super::state::{GameEvent, GameState, GameStatus};
use super::tick::{place_food, tick};
use crate::config::GameConfig;
use crate::error::ConfigError;

/// Snake game engine, generic over its random source
#[derive(Debug, Clone)]
pub struct GameEngine<R = Pcg32> {
    config: GameConfig,
    rng: R,
    state: GameState,
}

impl GameEngine<Pcg32> {
    /// Engine driven by a PCG generator seeded with `seed`
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        log::info!("Seeding engine with {}", seed);
        Self::new(config, seeded(seed))
    }
}

impl<R: RandomSource> GameEngine<R> {
    /// Validate `config` and start the first episode
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = build_episode(&config, &mut rng, 0);
        Ok(Self { config, rng, state })
    }

    /// Read-only snapshot for the presentation layer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Direction applied by the last tick
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    /// Direction the next tick will apply
    pub fn pending_direction(&self) -> Direction {
        self.state.pending_direction
    }

    /// Request a heading for the next tick.
    ///
    /// Reversals of the committed direction are refused, as is any request
    /// once the episode is over. Returns whether the request was taken.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.state.status == GameStatus::GameOver {
            return false;
        }
        if requested == self.state.direction.opposite() {
            log::trace!(
                "Refusing reversal {:?} -> {:?}",
                self.state.direction,
                requested
            );
            return false;
        }
        self.state.pending_direction = requested;
        true
    }

    /// Flip between running and paused; no effect once the game is over
    pub fn toggle_pause(&mut self) -> GameStatus {
        self.state.status = match self.state.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            GameStatus::GameOver => GameStatus::GameOver,
        };
        log::debug!("Status now {:?}", self.state.status);
        self.state.status
    }

    /// Advance one tick; see [`tick`]
    pub fn tick(&mut self) -> Option<GameEvent> {
        tick(&mut self.state, &mut self.rng)
    }

    /// Start a new episode with the current configuration
    pub fn restart(&mut self) {
        let episode = self.state.episode + 1;
        self.state = build_episode(&self.config, &mut self.rng, episode);
    }

    /// Replace the configuration, then start a new episode with it
    pub fn restart_with(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.restart();
        Ok(())
    }
}

/// Lay out a fresh episode. `config` must already be validated, which
/// guarantees a free cell for the first food.
fn build_episode<R: RandomSource + ?Sized>(
    config: &GameConfig,
    rng: &mut R,
    episode: u32,
) -> GameState {
    let obstacles = generate_obstacles(config.grid_size, config.obstacle_count, rng);
    let mut state = GameState::new(
        episode,
        config.grid_size,
        config.initial_snake.iter().copied(),
        config.initial_direction,
        obstacles,
    );

    state.food = match config.initial_food {
        Some(cell) if state.is_free(cell) => Some(cell),
        Some(cell) => {
            log::debug!("Configured food {:?} is blocked, sampling instead", cell);
            place_food(&state, rng)
        }
        None => place_food(&state, rng),
    };

    log::info!(
        "Episode {} started: {}x{} grid, {} obstacle cells, food at {:?}",
        episode,
        state.grid_size,
        state.grid_size,
        state.obstacles.len(),
        state.food
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::cell::Cell;
    use crate::sim::rng::SequenceRng;
    use crate::sim::state::GameOverCause;
    use proptest::prelude::*;

    fn no_walls() -> GameConfig {
        GameConfig {
            obstacle_count: 0,
            ..Default::default()
        }
    }

    fn assert_food_disjoint(state: &GameState) {
        if let Some(food) = state.food {
            assert!(!state.is_snake(food), "food {food:?} on snake");
            assert!(!state.is_obstacle(food), "food {food:?} on obstacle");
            assert!(food.in_bounds(state.grid_size));
        }
    }

    #[test]
    fn test_new_engine_is_running() {
        let engine = GameEngine::seeded(GameConfig::default(), 12345).expect("valid config");
        let state = engine.state();
        assert_eq!(engine.status(), GameStatus::Running);
        assert_eq!(engine.score(), 0);
        assert_eq!(state.snake_len(), 3);
        assert_eq!(state.head(), Cell::new(8, 8));
        assert!(!state.obstacles.is_empty());
        assert!(state.food.is_some());
        assert_food_disjoint(state);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = GameConfig {
            grid_size: 5,
            obstacle_count: 10,
            initial_snake: vec![Cell::new(2, 0), Cell::new(1, 0), Cell::new(0, 0)],
            ..Default::default()
        };
        assert!(matches!(
            GameEngine::seeded(config, 1),
            Err(ConfigError::Overcrowded { .. })
        ));
    }

    #[test]
    fn test_scripted_layout() {
        // One horizontal wall of length 2 on row 0 at x=0..2, then food (3,4)
        let config = GameConfig {
            obstacle_count: 1,
            ..Default::default()
        };
        let rng = SequenceRng::new([1, 0, 0, 0, 3, 4]);
        let engine = GameEngine::new(config, rng).expect("valid config");
        assert_eq!(
            engine.state().obstacles,
            vec![Cell::new(0, 0), Cell::new(1, 0)]
        );
        assert_eq!(engine.state().food, Some(Cell::new(3, 4)));
    }

    #[test]
    fn test_configured_initial_food() {
        let config = GameConfig {
            initial_food: Some(Cell::new(12, 12)),
            ..no_walls()
        };
        let engine = GameEngine::seeded(config, 9).expect("valid config");
        assert_eq!(engine.state().food, Some(Cell::new(12, 12)));

        // Food requested on the snake falls back to sampling
        let config = GameConfig {
            initial_food: Some(Cell::new(7, 8)),
            ..no_walls()
        };
        let engine = GameEngine::seeded(config, 9).expect("valid config");
        assert_ne!(engine.state().food, Some(Cell::new(7, 8)));
        assert_food_disjoint(engine.state());
    }

    #[test]
    fn test_reversal_is_refused() {
        let mut engine = GameEngine::seeded(no_walls(), 1).expect("valid config");
        assert_eq!(engine.direction(), Direction::Right);

        assert!(!engine.set_direction(Direction::Left));
        assert_eq!(engine.pending_direction(), Direction::Right);

        assert!(engine.set_direction(Direction::Up));
        assert_eq!(engine.pending_direction(), Direction::Up);

        assert!(engine.set_direction(Direction::Down));
        assert_eq!(engine.pending_direction(), Direction::Down);
    }

    #[test]
    fn test_reversal_guard_uses_committed_direction() {
        let mut engine = GameEngine::seeded(no_walls(), 1).expect("valid config");
        // Up then Left within one period: Left is checked against the
        // committed Right, so it is refused and the snake goes up
        assert!(engine.set_direction(Direction::Up));
        assert!(!engine.set_direction(Direction::Left));
        engine.tick();
        assert_eq!(engine.direction(), Direction::Up);
        assert_eq!(engine.state().head(), Cell::new(8, 7));

        // Now committed Up: Left is fine, Down is not
        assert!(!engine.set_direction(Direction::Down));
        assert!(engine.set_direction(Direction::Left));
        engine.tick();
        assert_eq!(engine.state().head(), Cell::new(7, 7));
    }

    #[test]
    fn test_wall_collision_scenario() {
        let config = GameConfig {
            initial_snake: vec![Cell::new(19, 8), Cell::new(18, 8), Cell::new(17, 8)],
            ..no_walls()
        };
        let mut engine = GameEngine::seeded(config, 5).expect("valid config");
        let before = engine.state().clone();

        let event = engine.tick();
        assert_eq!(
            event,
            Some(GameEvent::GameOver {
                score: 0,
                cause: GameOverCause::Wall
            })
        );
        assert_eq!(engine.status(), GameStatus::GameOver);
        assert_eq!(engine.state().snake, before.snake);
        assert_eq!(engine.state().food, before.food);
        assert_eq!(engine.score(), before.score);
    }

    #[test]
    fn test_consumption_scenario() {
        let config = GameConfig {
            initial_snake: vec![Cell::new(11, 12), Cell::new(10, 12), Cell::new(9, 12)],
            initial_food: Some(Cell::new(12, 12)),
            ..no_walls()
        };
        let mut engine = GameEngine::seeded(config, 77).expect("valid config");
        assert_eq!(engine.state().food, Some(Cell::new(12, 12)));

        let event = engine.tick();
        assert_eq!(event, Some(GameEvent::Consumed { score: 1 }));
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.state().snake_len(), 4);
        assert_eq!(engine.state().head(), Cell::new(12, 12));
        assert_food_disjoint(engine.state());
        assert_ne!(engine.state().food, Some(Cell::new(12, 12)));
    }

    #[test]
    fn test_pause_scenario() {
        let mut engine = GameEngine::seeded(no_walls(), 3).expect("valid config");
        assert_eq!(engine.toggle_pause(), GameStatus::Paused);

        // Intents are kept while paused, but nothing moves
        assert!(engine.set_direction(Direction::Down));
        let before = engine.state().clone();
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.state().snake, before.snake);
        assert_eq!(engine.state().time_ticks, before.time_ticks);

        assert_eq!(engine.toggle_pause(), GameStatus::Running);
        engine.tick();
        assert_eq!(engine.state().head(), Cell::new(8, 9));
        assert_eq!(engine.direction(), Direction::Down);
    }

    #[test]
    fn test_pause_resumes_committed_direction() {
        let mut engine = GameEngine::seeded(no_walls(), 3).expect("valid config");
        engine.toggle_pause();
        engine.tick();
        engine.toggle_pause();
        engine.tick();
        assert_eq!(engine.state().head(), Cell::new(9, 8));
    }

    #[test]
    fn test_toggle_pause_ignored_after_game_over() {
        let config = GameConfig {
            initial_snake: vec![Cell::new(19, 8), Cell::new(18, 8), Cell::new(17, 8)],
            ..no_walls()
        };
        let mut engine = GameEngine::seeded(config, 5).expect("valid config");
        engine.tick();
        assert_eq!(engine.toggle_pause(), GameStatus::GameOver);
        assert!(!engine.set_direction(Direction::Up));
        assert_eq!(engine.tick(), None);
    }

    #[test]
    fn test_restart_scenario() {
        let config = GameConfig {
            initial_snake: vec![Cell::new(19, 8), Cell::new(18, 8), Cell::new(17, 8)],
            ..Default::default()
        };
        let mut engine = GameEngine::seeded(config.clone(), 21).expect("valid config");
        let first_obstacles = engine.state().obstacles.clone();
        while engine.status() != GameStatus::GameOver {
            engine.tick();
        }

        engine.restart();
        let state = engine.state();
        assert_eq!(state.score, 0);
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.episode, 1);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(
            state.snake.iter().copied().collect::<Vec<_>>(),
            config.initial_snake
        );
        assert_eq!(state.direction, Direction::Right);
        assert_ne!(state.obstacles, first_obstacles);
        assert_food_disjoint(state);
    }

    #[test]
    fn test_restart_with_new_config() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 4).expect("valid config");
        let bigger = GameConfig {
            grid_size: 30,
            obstacle_count: 9,
            ..Default::default()
        };
        engine.restart_with(bigger).expect("valid config");
        assert_eq!(engine.state().grid_size, 30);
        assert_eq!(engine.config().obstacle_count, 9);

        let broken = GameConfig {
            grid_size: 3,
            ..Default::default()
        };
        assert!(engine.restart_with(broken).is_err());
        // Failed restart leaves the running episode alone
        assert_eq!(engine.state().grid_size, 30);
    }

    #[test]
    fn test_determinism() {
        // Two engines with the same seed and inputs evolve identically
        let mut a = GameEngine::seeded(GameConfig::default(), 99999).expect("valid config");
        let mut b = GameEngine::seeded(GameConfig::default(), 99999).expect("valid config");

        let turns = [
            Some(Direction::Up),
            None,
            Some(Direction::Left),
            None,
            Some(Direction::Down),
            None,
        ];
        for turn in turns.iter().cycle().take(40) {
            if let Some(dir) = turn {
                a.set_direction(*dir);
                b.set_direction(*dir);
            }
            assert_eq!(a.tick(), b.tick());
        }
        assert_eq!(a.state().snake, b.state().snake);
        assert_eq!(a.state().food, b.state().food);
        assert_eq!(a.state().obstacles, b.state().obstacles);
        assert_eq!(a.score(), b.score());
    }

    fn direction_strategy() -> impl Strategy<Value = Option<Direction>> {
        prop_oneof![
            Just(None),
            Just(Some(Direction::Up)),
            Just(Some(Direction::Down)),
            Just(Some(Direction::Left)),
            Just(Some(Direction::Right)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_invariants_hold(
            seed in any::<u64>(),
            grid in 5u32..=24,
            turns in prop::collection::vec(direction_strategy(), 1..200),
        ) {
            let config = GameConfig {
                grid_size: grid,
                obstacle_count: 2,
                initial_snake: vec![Cell::new(2, 0), Cell::new(1, 0), Cell::new(0, 0)],
                ..Default::default()
            };
            let mut engine = GameEngine::seeded(config, seed).expect("valid config");

            for turn in turns {
                if let Some(dir) = turn {
                    engine.set_direction(dir);
                }
                let before = engine.state().clone();
                let event = engine.tick();
                let after = engine.state();

                match event {
                    Some(GameEvent::GameOver { cause, .. }) => {
                        prop_assert_eq!(after.status, GameStatus::GameOver);
                        if cause != GameOverCause::BoardFilled {
                            prop_assert_eq!(&after.snake, &before.snake);
                            prop_assert_eq!(after.food, before.food);
                            prop_assert_eq!(after.score, before.score);
                        }
                        break;
                    }
                    Some(GameEvent::Consumed { score }) => {
                        prop_assert_eq!(score, before.score + 1);
                        prop_assert_eq!(after.snake_len(), before.snake_len() + 1);
                        prop_assert_eq!(Some(after.head()), before.food);
                    }
                    None => {
                        prop_assert_eq!(after.snake_len(), before.snake_len());
                        prop_assert_ne!(Some(after.head()), before.food);
                    }
                }

                // Body stays unique and food stays clear of everything
                let mut cells: Vec<Cell> = after.snake.iter().copied().collect();
                cells.sort();
                cells.dedup();
                prop_assert_eq!(cells.len(), after.snake_len());
                prop_assert!(after.food.is_some());
                assert_food_disjoint(after);
                prop_assert_eq!(&after.obstacles, &before.obstacles);
            }
        }
    }
}
