use crate::command::Command;
use crate::game::{GameState, GameStatus, Pace, TickEvent};
use crate::input::InputController;
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// A game session: the current game, the player's pending steering, and the
/// timer that drives the snake.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Session<R = rand::rngs::StdRng> {
    rng: R,
    state: GameState,
    input: InputController,
    scheduler: Scheduler,
}

impl<R: Rng> Session<R> {
    pub(crate) fn new(pace: Pace, mut rng: R) -> Session<R> {
        let state = GameState::new(pace, &mut rng);
        Session {
            rng,
            state,
            input: InputController::new(),
            scheduler: Scheduler::default(),
        }
    }

    /// Start the game if it hasn't been started yet.  Returns `true` if the
    /// game was started.
    pub(crate) fn start(&mut self, now: Instant) -> bool {
        if self.state.status() != GameStatus::NotStarted {
            return false;
        }
        self.state = self.state.start();
        self.scheduler.arm(self.state.speed(), now);
        info!(
            speed_ms = self.state.speed().as_millis(),
            floor_ms = self.state.pace().floor().as_millis(),
            apple = ?self.state.apple(),
            "game_started"
        );
        true
    }

    /// Start a new game if the current one is over.  Returns `true` if a new
    /// game was started.
    pub(crate) fn restart(&mut self, now: Instant) -> bool {
        if self.state.status() != GameStatus::GameOver {
            return false;
        }
        let final_score = self.state.score();
        self.state = self.state.restart(&mut self.rng);
        self.input.clear();
        self.scheduler.arm(self.state.speed(), now);
        info!(
            final_score,
            speed_ms = self.state.speed().as_millis(),
            "game_restarted"
        );
        true
    }

    /// Run a tick if one is due.  Returns `None` if no tick was due.
    pub(crate) fn advance(&mut self, now: Instant) -> Option<TickEvent> {
        if !self.scheduler.is_due(now) {
            return None;
        }
        let direction = self.input.take().unwrap_or_else(|| self.state.direction());
        let (state, event) = self.state.tick(direction, &mut self.rng);
        let speed_changed = state.speed() != self.state.speed();
        self.state = state;
        match event {
            TickEvent::Collided(collision) => {
                info!(
                    cause = collision.as_str(),
                    score = self.state.score(),
                    head = ?self.state.head(),
                    ?direction,
                    "game_over"
                );
            }
            TickEvent::Ate { apple } => {
                debug!(score = self.state.score(), ?apple, "apple_eaten");
            }
            TickEvent::Moved | TickEvent::Idle => (),
        }
        if self.state.status() == GameStatus::Running {
            if speed_changed {
                self.scheduler.arm(self.state.speed(), now);
                debug!(
                    interval_ms = self.state.speed().as_millis(),
                    "scheduler_rearmed"
                );
            } else {
                self.scheduler.reschedule(now);
            }
        } else {
            self.scheduler.stop();
        }
        Some(event)
    }
}

impl<R> Session<R> {
    /// Forward a key command to the steering mailbox.  Returns `true` if the
    /// command was a direction.
    pub(crate) fn steer_key(&mut self, cmd: Command) -> bool {
        let accepted = self.input.key(cmd);
        if accepted {
            debug!(pending = ?self.input.pending(), "steer_key");
        }
        accepted
    }

    /// Forward an on-screen control activation to the steering mailbox.
    /// Returns `true` if `glyph` was a direction control.
    pub(crate) fn steer_glyph(&mut self, glyph: char) -> bool {
        let accepted = self.input.glyph(glyph);
        if accepted {
            debug!(pending = ?self.input.pending(), "steer_glyph");
        }
        accepted
    }

    pub(crate) fn state(&self) -> &GameState {
        &self.state
    }

    /// When the next tick is due, or `None` if the snake isn't moving
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    #[cfg(test)]
    pub(crate) fn set_apple(&mut self, apple: crate::game::Position) {
        self.state = self.state.with_apple(apple);
    }
}

/// A repeating timer with an adjustable period.
///
/// Time is never read from the clock here; callers pass in `now`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Scheduler {
    interval: Option<Duration>,
    next_tick: Option<Instant>,
}

impl Scheduler {
    /// Start firing every `interval`, with the first tick one interval after
    /// `now`.  Replaces any previous arming.
    pub(crate) fn arm(&mut self, interval: Duration, now: Instant) {
        self.interval = Some(interval);
        self.next_tick = Some(now + interval);
    }

    /// Schedule the next tick one interval after `now`
    pub(crate) fn reschedule(&mut self, now: Instant) {
        if let Some(interval) = self.interval {
            self.next_tick = Some(now + interval);
        }
    }

    pub(crate) fn stop(&mut self) {
        self.interval = None;
        self.next_tick = None;
    }

    pub(crate) fn is_due(&self, now: Instant) -> bool {
        self.next_tick.is_some_and(|when| when <= now)
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    #[cfg(test)]
    pub(crate) fn interval(&self) -> Option<Duration> {
        self.interval
    }
}
