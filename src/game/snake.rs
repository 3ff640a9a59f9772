use super::geometry::{occupies, Position};
use std::collections::VecDeque;

/// The snake, as a queue of board cells
///
/// The segments are stored head-first: index 0 is the head and the last
/// element is the tip of the tail.  There is always at least one segment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    segments: VecDeque<Position>,
}

impl Snake {
    /// Create a new single-segment snake at `head`
    pub(crate) fn new(head: Position) -> Snake {
        Snake {
            segments: VecDeque::from([head]),
        }
    }

    /// Build a snake from head-first segments.  Returns `None` if
    /// `segments` is empty.
    #[cfg(test)]
    pub(crate) fn from_segments<I: IntoIterator<Item = Position>>(segments: I) -> Option<Snake> {
        let segments = VecDeque::from_iter(segments);
        (!segments.is_empty()).then_some(Snake { segments })
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        // `segments` is never empty, but don't panic over it.
        self.segments
            .front()
            .copied()
            .unwrap_or_else(Position::center)
    }

    /// Return the segments of the snake, head first
    pub(crate) fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if any segment of the snake, including the tail cell,
    /// is at `pos`
    pub(crate) fn occupies(&self, pos: Position) -> bool {
        occupies(pos, &self.segments)
    }

    /// Return a copy of the snake that has moved its head to `head`.  If
    /// `grow` is `false`, the last tail segment is dropped so that the length
    /// stays the same; otherwise the snake is one segment longer.
    pub(crate) fn slither(&self, head: Position, grow: bool) -> Snake {
        let mut segments = self.segments.clone();
        segments.push_front(head);
        if !grow {
            let _ = segments.pop_back();
        }
        Snake { segments }
    }
}
