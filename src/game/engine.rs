use std::collections::HashSet;

use log::{debug, info};
use rand::Rng;
use rand::rngs::ThreadRng;

use super::{
    collision::{is_self_collision, is_wall_collision, place_food},
    config::GameConfig,
    direction::Direction,
    error::ConfigError,
    state::{
        advance_head, grow, step as step_snake, CollisionType, GameState, GameStatus, Position,
        Snake,
    },
};
use crate::input::InputSource;

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Status of the round after the step
    pub status: GameStatus,
}

impl StepResult {
    pub fn terminated(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn collision(&self) -> Option<CollisionType> {
        match self.status {
            GameStatus::GameOver(collision) => Some(collision),
            _ => None,
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a new round with the snake centred and heading right
    pub fn reset(&mut self) -> GameState {
        let (width, height) = (self.config.board_width, self.config.board_height);
        let center = Position::new((width / 2) as i32, (height / 2) as i32);
        let direction = Direction::default();

        let snake = Snake::new(center, direction, self.config.initial_snake_length);
        let occupied: HashSet<Position> = snake.segments().copied().collect();
        let placed = place_food(width, height, &occupied, &mut self.rng);

        let mut state = GameState::new(snake, center, direction, width, height);
        match placed {
            Ok(food) => state.food = food,
            Err(err) => {
                debug!("{err} at round start");
                state.status = GameStatus::Cleared;
            }
        }

        info!(
            "new round on {}x{} board, snake length {}",
            width,
            height,
            state.snake.len()
        );

        state
    }

    /// Run one tick, reading the player's intent from `input`
    pub fn tick<I: InputSource + ?Sized>(
        &mut self,
        state: &mut GameState,
        input: &mut I,
    ) -> StepResult {
        if state.status.is_running() && input.poll_quit() {
            self.quit(state);
            return StepResult {
                ate_food: false,
                status: state.status,
            };
        }

        let intent = input.poll_direction();
        self.step(state, intent)
    }

    /// Leave a running round without it counting as a loss
    pub fn quit(&self, state: &mut GameState) {
        if state.status.is_running() {
            info!("round quit with score {}", state.score);
            state.status = GameStatus::Quit;
        }
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState, intent: Option<Direction>) -> StepResult {
        if state.status.is_terminal() {
            return StepResult {
                ate_food: false,
                status: state.status,
            };
        }

        // 180-degree turns are ignored
        if let Some(requested) = intent {
            if !state.direction.is_reversal(requested) {
                state.direction = requested;
            }
        }

        let new_head = advance_head(&state.snake, state.direction);

        if let Some(collision) = self.check_collision(state, new_head) {
            info!(
                "round over ({:?}) at {:?}, score {}",
                collision, new_head, state.score
            );
            state.status = GameStatus::GameOver(collision);
            return StepResult {
                ate_food: false,
                status: state.status,
            };
        }

        let ate_food = new_head == state.food;
        if ate_food {
            state.score = state.score.saturating_add(self.config.food_reward);
            grow(state);
            debug!("food eaten at {:?}, score {}", new_head, state.score);
        }

        state.pending_growth = step_snake(&mut state.snake, new_head, state.pending_growth);

        if ate_food {
            self.respawn_food(state);
        }

        state.steps += 1;

        StepResult {
            ate_food,
            status: state.status,
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if is_wall_collision(pos, state.board_width, state.board_height) {
            return Some(CollisionType::Wall);
        }

        if is_self_collision(pos, &state.snake, state.pending_growth) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn respawn_food(&mut self, state: &mut GameState) {
        let occupied: HashSet<Position> = state.snake.segments().copied().collect();

        match place_food(state.board_width, state.board_height, &occupied, &mut self.rng) {
            Ok(food) => state.food = food,
            Err(err) => {
                info!("board cleared with score {} ({err})", state.score);
                state.status = GameStatus::Cleared;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;

    fn engine(config: GameConfig) -> GameEngine<StdRng> {
        GameEngine::with_rng(config, StdRng::seed_from_u64(3)).unwrap()
    }

    fn state_with(
        segments: &[(i32, i32)],
        food: (i32, i32),
        direction: Direction,
        width: usize,
        height: usize,
    ) -> GameState {
        let snake = Snake::from_segments(segments.iter().copied()).unwrap();
        GameState::new(snake, food.into(), direction, width, height)
    }

    /// Replays queued intents, one per tick
    #[derive(Default)]
    struct ScriptedInput {
        directions: VecDeque<Option<Direction>>,
        quit_at: Option<usize>,
        polls: usize,
    }

    impl InputSource for ScriptedInput {
        fn poll_direction(&mut self) -> Option<Direction> {
            self.directions.pop_front().flatten()
        }

        fn poll_quit(&mut self) -> bool {
            let now = self.polls;
            self.polls += 1;
            self.quit_at == Some(now)
        }
    }

    #[test]
    fn test_reset() {
        let mut engine = engine(GameConfig::default().with_initial_snake_length(3));
        let state = engine.reset();

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.pending_growth, 0);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Position::new(10, 7));
        assert!(!state.is_occupied_by_snake(state.food));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(GameEngine::new(GameConfig::new(0, 0)).is_err());
        assert!(GameEngine::new(GameConfig::small()).is_ok());
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine(GameConfig::small());
        let mut state = state_with(&[(5, 5), (4, 5)], (0, 0), Direction::Right, 10, 10);

        let result = engine.step(&mut state, None);

        assert!(!result.terminated());
        assert!(!result.ate_food);
        assert_eq!(state.steps, 1);
        assert_eq!(state.snake.head(), Position::new(6, 5));
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut engine = engine(GameConfig::small());
        let mut state = state_with(&[(5, 5), (4, 5)], (0, 0), Direction::Right, 10, 10);

        engine.step(&mut state, Some(Direction::Left));

        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.snake.head(), Position::new(6, 5));
    }

    #[test]
    fn test_turn_is_accepted() {
        let mut engine = engine(GameConfig::small());
        let mut state = state_with(&[(5, 5), (4, 5)], (0, 0), Direction::Right, 10, 10);

        engine.step(&mut state, Some(Direction::Down));

        assert_eq!(state.direction, Direction::Down);
        assert_eq!(state.snake.head(), Position::new(5, 6));
    }

    #[test]
    fn test_wall_collision_freezes_snake() {
        let mut engine = engine(GameConfig::new(5, 5));
        let mut state = state_with(&[(4, 2), (3, 2)], (0, 0), Direction::Right, 5, 5);
        let before = state.snake.clone();

        let result = engine.step(&mut state, None);

        assert!(result.terminated());
        assert_eq!(result.collision(), Some(CollisionType::Wall));
        assert_eq!(state.status, GameStatus::GameOver(CollisionType::Wall));
        assert_eq!(state.snake, before);
        assert_eq!(state.steps, 0);
        assert_eq!(state.direction, Direction::Right);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine(GameConfig::small());
        let mut state = state_with(
            &[(5, 5), (4, 5), (3, 5), (2, 5)],
            (8, 8),
            Direction::Right,
            10,
            10,
        );

        // Right: (6,5) (5,5) (4,5) (3,5)
        engine.step(&mut state, None);
        // Down: (6,6) (6,5) (5,5) (4,5)
        engine.step(&mut state, Some(Direction::Down));
        // Left: (5,6) (6,6) (6,5) (5,5)
        engine.step(&mut state, Some(Direction::Left));
        // Up onto (5,5), which is the tail about to move away
        let result = engine.step(&mut state, Some(Direction::Up));
        assert!(!result.terminated());
        assert_eq!(state.snake.len(), 4);

        // hook shape: heading Down, turning Right runs into the fourth segment
        let mut state = state_with(
            &[(2, 2), (2, 1), (3, 1), (3, 2), (3, 3)],
            (8, 8),
            Direction::Down,
            10,
            10,
        );
        let before = state.snake.clone();
        let result = engine.step(&mut state, Some(Direction::Right));

        assert!(result.terminated());
        assert_eq!(result.collision(), Some(CollisionType::SelfCollision));
        assert_eq!(state.snake, before);
    }

    #[test]
    fn test_tail_follow_blocked_while_growing() {
        let mut engine = engine(GameConfig::small());
        let mut state = state_with(
            &[(1, 0), (1, 1), (0, 1), (0, 0)],
            (9, 9),
            Direction::Up,
            10,
            10,
        );
        state.pending_growth = 1;

        let result = engine.step(&mut state, Some(Direction::Left));

        assert_eq!(result.collision(), Some(CollisionType::SelfCollision));
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine(GameConfig::small());
        let mut state = state_with(&[(5, 5), (4, 5)], (6, 5), Direction::Right, 10, 10);

        let result = engine.step(&mut state, None);

        assert!(result.ate_food);
        assert_eq!(state.score, 10);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.pending_growth, 0);
        assert!(!state.is_occupied_by_snake(state.food));
    }

    #[test]
    fn test_growth_is_exactly_one_segment() {
        let mut engine = engine(GameConfig::small());
        let mut state = state_with(&[(2, 5)], (3, 5), Direction::Right, 10, 10);

        engine.step(&mut state, None);
        assert_eq!(state.snake.len(), 2);

        // keep food out of the way for the next few ticks
        state.food = Position::new(0, 0);
        for _ in 0..3 {
            engine.step(&mut state, None);
            assert_eq!(state.snake.len(), 2);
        }
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_score_saturates_with_huge_reward() {
        let mut engine = engine(GameConfig::small().with_food_reward(u32::MAX));
        let mut state = state_with(&[(5, 5)], (6, 5), Direction::Right, 10, 10);

        engine.step(&mut state, None);
        assert_eq!(state.score, u32::MAX);

        state.food = Position::new(7, 5);
        let result = engine.step(&mut state, None);

        assert!(result.ate_food);
        assert_eq!(state.score, u32::MAX);
    }

    #[test]
    fn test_custom_food_reward() {
        let mut engine = engine(GameConfig::small().with_food_reward(25));
        let mut state = state_with(&[(5, 5)], (5, 4), Direction::Up, 10, 10);

        engine.step(&mut state, None);

        assert_eq!(state.score, 25);
    }

    #[test]
    fn test_length_changes_only_when_eating() {
        let mut engine = engine(GameConfig::small());
        let mut state = engine.reset();
        let turns = [
            None,
            Some(Direction::Down),
            None,
            Some(Direction::Left),
            None,
            None,
            Some(Direction::Up),
            None,
            None,
            Some(Direction::Right),
        ];

        for intent in turns.iter().cycle().take(60) {
            let before = state.snake.len();
            let result = engine.step(&mut state, *intent);
            if result.terminated() {
                break;
            }
            let expected = before + usize::from(result.ate_food);
            assert_eq!(state.snake.len(), expected);
            assert!(!state.is_occupied_by_snake(state.food));
        }
    }

    #[test]
    fn test_board_cleared_when_no_cell_left() {
        let mut engine = engine(GameConfig::new(2, 1));
        let mut state = state_with(&[(0, 0)], (1, 0), Direction::Right, 2, 1);

        let result = engine.step(&mut state, None);

        assert!(result.ate_food);
        assert_eq!(result.status, GameStatus::Cleared);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine(GameConfig::small());

        for status in [
            GameStatus::GameOver(CollisionType::Wall),
            GameStatus::Cleared,
            GameStatus::Quit,
        ] {
            let mut state = engine.reset();
            state.status = status;
            let frozen = state.clone();

            for _ in 0..3 {
                let result = engine.step(&mut state, Some(Direction::Down));
                assert_eq!(result.status, status);
                assert!(!result.ate_food);
            }
            assert_eq!(state, frozen);
        }
    }

    #[test]
    fn test_tick_uses_polled_direction() {
        let mut engine = engine(GameConfig::small());
        let mut state = state_with(&[(5, 5)], (0, 0), Direction::Right, 10, 10);
        let mut input = ScriptedInput {
            directions: VecDeque::from([Some(Direction::Down), None]),
            ..Default::default()
        };

        engine.tick(&mut state, &mut input);
        engine.tick(&mut state, &mut input);

        assert_eq!(state.direction, Direction::Down);
        assert_eq!(state.snake.head(), Position::new(5, 7));
    }

    #[test]
    fn test_tick_quit_is_not_a_loss() {
        let mut engine = engine(GameConfig::small());
        let mut state = state_with(&[(5, 5)], (0, 0), Direction::Right, 10, 10);
        state.score = 20;
        let mut input = ScriptedInput {
            quit_at: Some(1),
            ..Default::default()
        };

        engine.tick(&mut state, &mut input);
        let head = state.snake.head();
        let result = engine.tick(&mut state, &mut input);

        assert_eq!(result.status, GameStatus::Quit);
        assert_eq!(state.score, 20);
        assert_eq!(state.snake.head(), head);

        engine.tick(&mut state, &mut input);
        assert_eq!(state.status, GameStatus::Quit);
        assert_eq!(state.snake.head(), head);
    }

    #[test]
    fn test_quit_after_game_over_keeps_game_over() {
        let mut engine = engine(GameConfig::small());
        let mut state = engine.reset();
        state.status = GameStatus::GameOver(CollisionType::SelfCollision);

        engine.quit(&mut state);

        assert_eq!(state.status, GameStatus::GameOver(CollisionType::SelfCollision));
    }
}
