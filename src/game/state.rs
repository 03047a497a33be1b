use std::collections::VecDeque;

use super::direction::Direction;
use super::snapshot::GameSnapshot;

/// A position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The snake on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: VecDeque<Position>,
}

impl Snake {
    /// Create a snake whose body trails behind `head`, opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let back = direction.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut segment = head;
        body.push_back(segment);

        for _ in 1..length {
            segment = segment.moved_in_direction(back);
            body.push_back(segment);
        }

        Self { body }
    }

    /// Build a snake from explicit segments, head first.
    ///
    /// Returns `None` if `segments` is empty.
    pub fn from_segments<I>(segments: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Into<Position>,
    {
        let body: VecDeque<Position> = segments.into_iter().map(Into::into).collect();
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Position> + '_ {
        self.body.iter()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// The round was lost
    GameOver(CollisionType),
    /// The snake fills the board; no cell is left for food
    Cleared,
    /// The player left the round
    Quit,
}

impl GameStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, GameStatus::Running)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_running()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub direction: Direction,
    /// Tail-retention moves still owed from food eaten
    pub pending_growth: usize,
    pub board_width: usize,
    pub board_height: usize,
    pub score: u32,
    pub steps: u32,
    pub status: GameStatus,
}

impl GameState {
    /// Create a new running game state
    pub fn new(
        snake: Snake,
        food: Position,
        direction: Direction,
        board_width: usize,
        board_height: usize,
    ) -> Self {
        Self {
            snake,
            food,
            direction,
            pending_growth: 0,
            board_width,
            board_height,
            score: 0,
            steps: 0,
            status: GameStatus::Running,
        }
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains(pos)
    }

    /// Read-only view handed to renderers
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board_width: self.board_width,
            board_height: self.board_height,
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            score: self.score,
            status: self.status,
        }
    }
}

/// Position the head would reach moving one cell in `direction`. No bounds checking.
pub fn advance_head(snake: &Snake, direction: Direction) -> Position {
    snake.head().moved_in_direction(direction)
}

/// Owe the snake one more segment; the length changes on the next `step`.
pub fn grow(state: &mut GameState) {
    state.pending_growth += 1;
}

/// Prepend `new_head` and drop the tail unless growth is pending.
///
/// Returns the growth still owed after this move.
pub fn step(snake: &mut Snake, new_head: Position, growth_pending: usize) -> usize {
    snake.body.push_front(new_head);

    if growth_pending > 0 {
        growth_pending - 1
    } else {
        snake.body.pop_back();
        0
    }
}
