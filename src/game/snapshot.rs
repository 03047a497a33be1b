use super::state::{GameStatus, Position};

/// Read-only copy of a round, produced once per tick for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub board_width: usize,
    pub board_height: usize,
    /// Segments, head first
    pub snake: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub status: GameStatus,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    pub fn length(&self) -> usize {
        self.snake.len()
    }
}
