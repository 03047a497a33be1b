use std::time::Duration;

use super::error::ConfigError;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Width of the board in cells
    pub board_width: usize,
    /// Height of the board in cells
    pub board_height: usize,
    /// Time between two game ticks
    pub tick_interval: Duration,
    /// Score awarded per food eaten
    pub food_reward: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 20,
            board_height: 15,
            tick_interval: Duration::from_millis(200),
            food_reward: 10,
            initial_snake_length: 1,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            board_width: width,
            board_height: height,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn with_food_reward(mut self, food_reward: u32) -> Self {
        self.food_reward = food_reward;
        self
    }

    pub fn with_initial_snake_length(mut self, length: usize) -> Self {
        self.initial_snake_length = length;
        self
    }

    /// Check that a round can be started with this configuration.
    ///
    /// The initial snake is laid out leftwards from the board centre, so it
    /// must fit in the left half of the centre row and leave at least one
    /// free cell for food.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.board_width, self.board_height);

        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyBoard { width, height });
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(ConfigError::BoardTooLarge { width, height });
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }

        let length = self.initial_snake_length;
        if length == 0 {
            return Err(ConfigError::ZeroSnakeLength);
        }
        if length > width / 2 + 1 || length >= width.saturating_mul(height) {
            return Err(ConfigError::SnakeDoesNotFit { length, width });
        }

        Ok(())
    }
}
