use std::fmt;

/// Food could not be placed because the snake covers every cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoFreeCellError {
    pub board_width: usize,
    pub board_height: usize,
}

impl fmt::Display for NoFreeCellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no free cell left on {}x{} board",
            self.board_width, self.board_height
        )
    }
}

impl std::error::Error for NoFreeCellError {}

/// Rejected game configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyBoard { width: usize, height: usize },
    BoardTooLarge { width: usize, height: usize },
    ZeroTickInterval,
    ZeroSnakeLength,
    SnakeDoesNotFit { length: usize, width: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyBoard { width, height } => {
                write!(f, "board must not be empty (got {}x{})", width, height)
            }
            ConfigError::BoardTooLarge { width, height } => {
                write!(f, "board {}x{} exceeds the coordinate range", width, height)
            }
            ConfigError::ZeroTickInterval => write!(f, "tick interval must be non-zero"),
            ConfigError::ZeroSnakeLength => write!(f, "initial snake length must be at least 1"),
            ConfigError::SnakeDoesNotFit { length, width } => write!(
                f,
                "initial snake of length {} needs a wider board than {} with a free cell left for food",
                length, width
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
