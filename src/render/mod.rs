pub mod renderer;

pub use renderer::{board_cells, Cell, Renderer};
