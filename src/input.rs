use crate::command::Command;
use crate::game::Direction;

/// Holds at most one direction change that the player has asked for but that
/// the snake hasn't acted on yet.
///
/// Each recognized signal replaces whatever was pending before it; there is
/// no queue.  Turning the snake around 180° is not prevented.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct InputController {
    pending: Option<Direction>,
}

impl InputController {
    pub(crate) fn new() -> InputController {
        InputController::default()
    }

    /// Handle a directional key command.  Returns `false` (and changes
    /// nothing) if `cmd` isn't a direction.
    pub(crate) fn key(&mut self, cmd: Command) -> bool {
        let direction = match cmd {
            Command::Up => Direction::Up,
            Command::Down => Direction::Down,
            Command::Left => Direction::Left,
            Command::Right => Direction::Right,
            _ => return false,
        };
        self.pending = Some(direction);
        true
    }

    /// Handle activation of an on-screen control showing `glyph`.  Returns
    /// `false` (and changes nothing) if `glyph` isn't one of the controls.
    pub(crate) fn glyph(&mut self, glyph: char) -> bool {
        let Some(direction) = Direction::from_glyph(glyph) else {
            return false;
        };
        self.pending = Some(direction);
        true
    }

    pub(crate) fn pending(&self) -> Option<Direction> {
        self.pending
    }

    /// Remove & return the pending direction
    pub(crate) fn take(&mut self) -> Option<Direction> {
        self.pending.take()
    }

    pub(crate) fn clear(&mut self) {
        self.pending = None;
    }
}
