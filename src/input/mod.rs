//! Input adapter: raw key events in, direction intents out.

pub mod handler;
pub mod source;

pub use handler::{InputHandler, KeyAction};
pub use source::{InputSlot, InputSource};
