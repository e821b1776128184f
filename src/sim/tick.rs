//! Fixed timestep simulation tick
//!
//! Advances an episode by exactly one cell of movement.

use super::cell::Cell;
use super::rng::RandomSource;
use super::state::{GameEvent, GameOverCause, GameState, GameStatus};

/// Random probes before food placement falls back to scanning free cells
pub const FOOD_SAMPLE_ATTEMPTS: u32 = 256;

/// Advance the game state by one tick.
///
/// Does nothing unless the episode is running. Returns the single event the
/// tick produced, if any.
pub fn tick<R: RandomSource + ?Sized>(state: &mut GameState, rng: &mut R) -> Option<GameEvent> {
    if state.status != GameStatus::Running {
        return None;
    }

    let applied = state.pending_direction;
    let next = state.head().step(applied);

    // Body check uses the pre-move snake, tail included
    let collision = if !next.in_bounds(state.grid_size) {
        Some(GameOverCause::Wall)
    } else if state.is_snake(next) {
        Some(GameOverCause::SelfCollision)
    } else if state.is_obstacle(next) {
        Some(GameOverCause::Obstacle)
    } else {
        None
    };

    if let Some(cause) = collision {
        state.status = GameStatus::GameOver;
        log::info!(
            "Game over ({:?}) at {:?}, score {}, length {}",
            cause,
            next,
            state.score,
            state.snake_len()
        );
        return Some(GameEvent::GameOver {
            score: state.score,
            cause,
        });
    }

    state.time_ticks += 1;
    state.snake.push_front(next);

    let mut event = None;
    if state.food == Some(next) {
        state.score += 1;
        state.food = place_food(state, rng);
        if state.food.is_none() {
            state.status = GameStatus::GameOver;
            log::info!("Board filled, final score {}", state.score);
            event = Some(GameEvent::GameOver {
                score: state.score,
                cause: GameOverCause::BoardFilled,
            });
        } else {
            event = Some(GameEvent::Consumed { score: state.score });
        }
    } else {
        state.snake.pop_back();
    }

    state.direction = applied;
    event
}

/// Pick a cell for food that is free of the snake and every obstacle.
///
/// Uniform rejection sampling first; if the board is crowded enough that
/// sampling keeps missing, choose uniformly among the remaining free cells.
/// Returns `None` only when no free cell exists.
pub fn place_food<R: RandomSource + ?Sized>(state: &GameState, rng: &mut R) -> Option<Cell> {
    let n = state.grid_size;
    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let candidate = Cell::new(rng.below(n) as i32, rng.below(n) as i32);
        if state.is_free(candidate) {
            return Some(candidate);
        }
    }

    let free = state.free_cells();
    if free.is_empty() {
        return None;
    }
    log::debug!(
        "Food sampling missed {} times, choosing among {} free cells",
        FOOD_SAMPLE_ATTEMPTS,
        free.len()
    );
    Some(free[rng.below(free.len() as u32) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::cell::Direction;
    use crate::sim::rng::{SequenceRng, seeded};

    fn state_with(snake: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> GameState {
        let mut state = GameState::new(
            0,
            20,
            snake.iter().map(|&c| Cell::from(c)),
            direction,
            Vec::new(),
        );
        state.food = Some(Cell::from(food));
        state
    }

    #[test]
    fn test_tick_moves_forward() {
        let mut state = state_with(&[(8, 8), (7, 8), (6, 8)], Direction::Right, (0, 0));
        let mut rng = seeded(1);
        assert_eq!(tick(&mut state, &mut rng), None);
        assert_eq!(
            state.snake.iter().copied().collect::<Vec<_>>(),
            vec![Cell::new(9, 8), Cell::new(8, 8), Cell::new(7, 8)]
        );
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_wall_collision_freezes_state() {
        let mut state = state_with(&[(19, 8), (18, 8), (17, 8)], Direction::Right, (3, 3));
        let before = state.clone();
        let mut rng = seeded(1);

        let event = tick(&mut state, &mut rng);
        assert_eq!(
            event,
            Some(GameEvent::GameOver {
                score: 0,
                cause: GameOverCause::Wall
            })
        );
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.snake, before.snake);
        assert_eq!(state.food, before.food);
        assert_eq!(state.score, before.score);

        // Terminal: no second event
        assert_eq!(tick(&mut state, &mut rng), None);
        assert_eq!(state.snake, before.snake);
    }

    #[test]
    fn test_consumption_grows_and_relocates_food() {
        let mut state = state_with(&[(11, 12), (10, 12), (9, 12)], Direction::Right, (12, 12));
        // First probe lands on the snake, second is free
        let mut rng = SequenceRng::new([12, 12, 4, 5]);

        let event = tick(&mut state, &mut rng);
        assert_eq!(event, Some(GameEvent::Consumed { score: 1 }));
        assert_eq!(state.score, 1);
        assert_eq!(state.snake_len(), 4);
        assert_eq!(state.head(), Cell::new(12, 12));
        assert_eq!(state.food, Some(Cell::new(4, 5)));
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn test_self_collision_includes_tail() {
        // Square loop: head at (5,5) moving down into the tail at (5,6)
        let mut state = state_with(&[(5, 5), (6, 5), (6, 6), (5, 6)], Direction::Down, (0, 0));
        let mut rng = seeded(1);
        let event = tick(&mut state, &mut rng);
        assert_eq!(
            event,
            Some(GameEvent::GameOver {
                score: 0,
                cause: GameOverCause::SelfCollision
            })
        );
    }

    #[test]
    fn test_obstacle_collision() {
        let mut state = state_with(&[(8, 8), (7, 8), (6, 8)], Direction::Right, (0, 0));
        state.obstacles = vec![Cell::new(9, 8)];
        let mut rng = seeded(1);
        let event = tick(&mut state, &mut rng);
        assert!(matches!(
            event,
            Some(GameEvent::GameOver {
                cause: GameOverCause::Obstacle,
                ..
            })
        ));
        assert_eq!(state.head(), Cell::new(8, 8));
    }

    #[test]
    fn test_pending_direction_is_committed() {
        let mut state = state_with(&[(8, 8), (7, 8), (6, 8)], Direction::Right, (0, 0));
        state.pending_direction = Direction::Up;
        let mut rng = seeded(1);
        tick(&mut state, &mut rng);
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.head(), Cell::new(8, 7));
    }

    #[test]
    fn test_paused_tick_is_noop() {
        let mut state = state_with(&[(8, 8), (7, 8), (6, 8)], Direction::Right, (0, 0));
        state.status = GameStatus::Paused;
        let before = state.clone();
        let mut rng = seeded(1);
        assert_eq!(tick(&mut state, &mut rng), None);
        assert_eq!(state.snake, before.snake);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_place_food_falls_back_to_free_cells() {
        let mut state = GameState::new(
            0,
            5,
            [Cell::new(2, 2), Cell::new(1, 2), Cell::new(0, 2)],
            Direction::Right,
            Vec::new(),
        );
        // Wall everything except (4,4)
        state.obstacles = (0..5)
            .flat_map(|y| (0..5).map(move |x| Cell::new(x, y)))
            .filter(|&c| c != Cell::new(4, 4) && !state.snake.contains(&c))
            .collect();
        // Probes always hit (0,0), which is walled
        let mut rng = SequenceRng::new([0]);
        assert_eq!(place_food(&state, &mut rng), Some(Cell::new(4, 4)));
    }

    #[test]
    fn test_board_filled_ends_episode() {
        let mut state = GameState::new(
            0,
            5,
            [Cell::new(3, 4), Cell::new(2, 4), Cell::new(1, 4)],
            Direction::Right,
            Vec::new(),
        );
        state.obstacles = (0..5)
            .flat_map(|y| (0..5).map(move |x| Cell::new(x, y)))
            .filter(|&c| c.y != 4)
            .collect();
        state.obstacles.push(Cell::new(0, 4));
        state.food = Some(Cell::new(4, 4));

        let mut rng = seeded(3);
        let event = tick(&mut state, &mut rng);
        assert_eq!(
            event,
            Some(GameEvent::GameOver {
                score: 1,
                cause: GameOverCause::BoardFilled
            })
        );
        assert_eq!(state.food, None);
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.snake_len(), 4);
    }
}
