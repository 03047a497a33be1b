//! Snake - the classic game in the terminal
//!
//! This library provides:
//! - Core game logic (game module), free of any terminal I/O
//! - Keyboard input adapter (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal session (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
