use super::geometry::{random_position, Position};
use super::snake::Snake;
use rand::Rng;

/// Pick a random position for an apple that is not on any part of `snake`.
///
/// Positions are sampled until one misses the snake.  This never returns if
/// the snake covers the entire board.
pub(crate) fn place_apple<R: Rng + ?Sized>(snake: &Snake, rng: &mut R) -> Position {
    loop {
        let pos = random_position(rng);
        if !snake.occupies(pos) {
            return pos;
        }
    }
}
