//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The interactive mode drives it one tick at a time and renders its snapshots.

pub mod collision;
pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use collision::{is_self_collision, is_wall_collision, place_food};
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, StepResult};
pub use error::{ConfigError, NoFreeCellError};
pub use snapshot::GameSnapshot;
pub use state::{advance_head, grow, step, CollisionType, GameState, GameStatus, Position, Snake};
