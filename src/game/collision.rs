//! Pure collision predicates and food placement.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::error::NoFreeCellError;
use super::state::{Position, Snake};

/// True if `pos` lies outside a `width` x `height` board
pub fn is_wall_collision(pos: Position, width: usize, height: usize) -> bool {
    pos.x < 0 || pos.y < 0 || pos.x as usize >= width || pos.y as usize >= height
}

/// True if `new_head` runs into the body as it will be after this move.
///
/// Without pending growth the tail cell is vacated on the same tick, so
/// stepping onto it is legal.
pub fn is_self_collision(new_head: Position, snake: &Snake, growth_pending: usize) -> bool {
    let keep = if growth_pending > 0 {
        snake.len()
    } else {
        snake.len() - 1
    };

    snake.segments().take(keep).any(|&segment| segment == new_head)
}

/// Pick a random cell not in `occupied`, uniformly over the free cells
pub fn place_food<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    occupied: &HashSet<Position>,
    rng: &mut R,
) -> Result<Position, NoFreeCellError> {
    let free: Vec<Position> = (0..height)
        .flat_map(|y| (0..width).map(move |x| Position::new(x as i32, y as i32)))
        .filter(|pos| !occupied.contains(pos))
        .collect();

    free.choose(rng).copied().ok_or(NoFreeCellError {
        board_width: width,
        board_height: height,
    })
}
