use crate::consts;
use rand::Rng;

/// [`consts::BOARD_SIZE`] as a signed coordinate
const SIDE: i32 = consts::BOARD_SIZE as i32;

/// A cell on the board, or one step off of it.
///
/// Coordinates are signed so that the position in front of a snake heading
/// into a wall can be represented; use [`Position::in_bounds()`] to check
/// whether it's actually on the board.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Position {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Position {
    pub(crate) const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    /// The center of the board, where every snake starts
    pub(crate) const fn center() -> Position {
        Position::new(SIDE / 2, SIDE / 2)
    }

    pub(crate) fn in_bounds(self) -> bool {
        (0..SIDE).contains(&self.x) && (0..SIDE).contains(&self.y)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// The unit vector `(dx, dy)` for this direction.  `y` grows downwards.
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }

    /// The on-screen control that steers in this direction
    pub(crate) fn glyph(self) -> char {
        match self {
            Direction::Left => consts::CONTROL_LEFT_GLYPH,
            Direction::Up => consts::CONTROL_UP_GLYPH,
            Direction::Right => consts::CONTROL_RIGHT_GLYPH,
            Direction::Down => consts::CONTROL_DOWN_GLYPH,
        }
    }

    pub(crate) fn from_glyph(glyph: char) -> Option<Direction> {
        match glyph {
            consts::CONTROL_LEFT_GLYPH => Some(Direction::Left),
            consts::CONTROL_UP_GLYPH => Some(Direction::Up),
            consts::CONTROL_RIGHT_GLYPH => Some(Direction::Right),
            consts::CONTROL_DOWN_GLYPH => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Offset `pos` one cell in `direction`.  No bounds checking is done.
pub(crate) fn translate(pos: Position, direction: Direction) -> Position {
    let (dx, dy) = direction.delta();
    Position::new(pos.x + dx, pos.y + dy)
}

/// Returns `true` if `pos` is equal to any of `positions`
pub(crate) fn occupies<'a, I>(pos: Position, positions: I) -> bool
where
    I: IntoIterator<Item = &'a Position>,
{
    positions.into_iter().any(|&p| p == pos)
}

/// Return a uniformly random position on the board
pub(crate) fn random_position<R: Rng + ?Sized>(rng: &mut R) -> Position {
    Position::new(rng.random_range(0..SIDE), rng.random_range(0..SIDE))
}
