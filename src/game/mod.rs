mod apple;
mod geometry;
mod snake;
use self::apple::place_apple;
use self::geometry::translate;
pub(crate) use self::geometry::{Direction, Position};
use self::snake::Snake;
use crate::consts;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;

/// A snapshot of a game in progress.
///
/// States are never modified in place; the transitions [`GameState::tick()`],
/// [`GameState::start()`], and [`GameState::restart()`] each return a new
/// state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameState {
    snake: Snake,
    direction: Direction,
    apple: Position,
    speed: Duration,
    status: GameStatus,
    pace: Pace,
}

impl GameState {
    /// Create a game that is waiting to be started, with a one-segment snake
    /// in the center of the board heading right.
    pub(crate) fn new<R: Rng + ?Sized>(pace: Pace, rng: &mut R) -> GameState {
        let snake = Snake::new(Position::center());
        let apple = place_apple(&snake, rng);
        GameState {
            snake,
            direction: Direction::Right,
            apple,
            speed: pace.initial(),
            status: GameStatus::NotStarted,
            pace,
        }
    }

    /// Begin a game that has not been started yet.  States in any other
    /// status are returned unchanged.
    pub(crate) fn start(&self) -> GameState {
        let mut state = self.clone();
        if state.status == GameStatus::NotStarted {
            state.status = GameStatus::Running;
        }
        state
    }

    /// Throw away the current game and begin a new one immediately, skipping
    /// [`GameStatus::NotStarted`]
    pub(crate) fn restart<R: Rng + ?Sized>(&self, rng: &mut R) -> GameState {
        GameState {
            status: GameStatus::Running,
            ..GameState::new(self.pace, rng)
        }
    }

    /// Advance the game by one step with the snake heading in `direction`.
    ///
    /// Moving off the board or onto any cell of the snake (including the tail
    /// cell that would be vacated by this very move) ends the game and leaves
    /// the snake & apple where they were.  Moving onto the apple grows the
    /// snake by one, places a new apple, and shortens the tick interval.
    ///
    /// If the game is not running, the state is returned unchanged.
    pub(crate) fn tick<R: Rng + ?Sized>(
        &self,
        direction: Direction,
        rng: &mut R,
    ) -> (GameState, TickEvent) {
        if self.status != GameStatus::Running {
            return (self.clone(), TickEvent::Idle);
        }
        let next_head = translate(self.snake.head(), direction);
        if let Some(collision) = self.collision_at(next_head) {
            let state = GameState {
                snake: self.snake.clone(),
                direction,
                apple: self.apple,
                speed: self.speed,
                status: GameStatus::GameOver,
                pace: self.pace,
            };
            return (state, TickEvent::Collided(collision));
        }
        if next_head == self.apple {
            let snake = self.snake.slither(next_head, true);
            let apple = place_apple(&snake, rng);
            let state = GameState {
                snake,
                direction,
                apple,
                speed: self.pace.quicken(self.speed),
                status: self.status,
                pace: self.pace,
            };
            (state, TickEvent::Ate { apple })
        } else {
            let state = GameState {
                snake: self.snake.slither(next_head, false),
                direction,
                apple: self.apple,
                speed: self.speed,
                status: self.status,
                pace: self.pace,
            };
            (state, TickEvent::Moved)
        }
    }

    fn collision_at(&self, pos: Position) -> Option<Collision> {
        if !pos.in_bounds() {
            return Some(Collision::Wall);
        }
        self.snake.occupies(pos).then_some(Collision::Body)
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn head(&self) -> Position {
        self.snake.head()
    }

    pub(crate) fn apple(&self) -> Position {
        self.apple
    }

    /// The direction in which the snake last moved (or tried to move)
    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// The current tick interval
    pub(crate) fn speed(&self) -> Duration {
        self.speed
    }

    pub(crate) fn status(&self) -> GameStatus {
        self.status
    }

    pub(crate) fn pace(&self) -> Pace {
        self.pace
    }

    /// One point per apple eaten
    pub(crate) fn score(&self) -> usize {
        self.snake.len().saturating_sub(1)
    }

    /// Return a copy of the state with the apple moved to `apple`
    #[cfg(test)]
    pub(crate) fn with_apple(&self, apple: Position) -> GameState {
        GameState {
            apple,
            ..self.clone()
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameStatus {
    NotStarted,
    Running,
    GameOver,
}

/// What happened during a call to [`GameState::tick()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickEvent {
    /// The game wasn't running, so nothing happened
    Idle,
    Moved,
    /// The snake ate the apple, and a new one was placed at `apple`
    Ate { apple: Position },
    Collided(Collision),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    Wall,
    Body,
}

impl Collision {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Collision::Wall => "wall",
            Collision::Body => "body",
        }
    }
}

/// How fast a game starts and how quickly it speeds up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Pace {
    initial: Duration,
    increment: Duration,
    floor: Duration,
}

impl Pace {
    /// Construct a `Pace` whose tick interval starts at `initial` and
    /// shrinks by `increment` per apple, but never below `floor`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `floor` is zero or `initial` is less than `floor`.
    pub(crate) fn new(
        initial: Duration,
        increment: Duration,
        floor: Duration,
    ) -> Result<Pace, PaceError> {
        if floor.is_zero() {
            return Err(PaceError::ZeroFloor);
        }
        if initial < floor {
            return Err(PaceError::InitialBelowFloor { initial, floor });
        }
        Ok(Pace {
            initial,
            increment,
            floor,
        })
    }

    pub(crate) fn initial(self) -> Duration {
        self.initial
    }

    pub(crate) fn increment(self) -> Duration {
        self.increment
    }

    pub(crate) fn floor(self) -> Duration {
        self.floor
    }

    fn quicken(self, speed: Duration) -> Duration {
        speed.saturating_sub(self.increment).max(self.floor)
    }
}

impl Default for Pace {
    fn default() -> Pace {
        Pace {
            initial: consts::INITIAL_SPEED,
            increment: consts::SPEED_INCREMENT,
            floor: consts::MIN_SPEED,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum PaceError {
    #[error("minimum tick interval must be greater than zero")]
    ZeroFloor,
    #[error("initial tick interval {initial:?} is less than the minimum {floor:?}")]
    InitialBelowFloor { initial: Duration, floor: Duration },
}
