use crate::command::Command;
use crate::session::Session;
use crate::ui::{Click, Hud};
use crossterm::event::{poll, read, Event, MouseButton, MouseEvent, MouseEventKind};
use rand::Rng;
use ratatui::{
    backend::Backend,
    layout::{Position, Rect},
    Terminal,
};
use std::io;
use std::time::Instant;
use tracing::info;

#[derive(Clone, Debug)]
pub(crate) struct App<R = rand::rngs::StdRng> {
    session: Session<R>,
    /// The frame area as of the last draw, used for mouse hit-testing
    area: Rect,
    quitting: bool,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(session: Session<R>) -> App<R> {
        App {
            session,
            area: Rect::default(),
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        info!("app_started");
        while !self.quitting {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        info!(score = self.session.state().score(), "app_quit");
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let frame = terminal.draw(|frame| frame.render_widget(&self.session, frame.area()))?;
        self.area = frame.area;
        Ok(())
    }

    /// Wait for either an input event or the next tick, whichever comes
    /// first.  With no tick scheduled, this blocks until there's input.
    fn process_input(&mut self) -> io::Result<()> {
        let ready = match self.session.deadline() {
            Some(deadline) => poll(deadline.saturating_duration_since(Instant::now()))?,
            None => true,
        };
        if ready {
            let ev = read()?;
            self.handle_event(ev, Instant::now());
        }
        self.session.advance(Instant::now());
        Ok(())
    }

    fn handle_event(&mut self, event: Event, now: Instant) {
        if let Some(ev) = event.as_key_press_event() {
            if let Some(cmd) = Command::from_key_event(ev) {
                self.handle_command(cmd, now);
            }
        } else if let Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) = event
        {
            self.handle_click(Position::new(column, row), now);
        }
    }

    fn handle_command(&mut self, cmd: Command, now: Instant) {
        match cmd {
            Command::Quit | Command::Q => self.quitting = true,
            Command::Enter | Command::Space => self.press_button(now),
            Command::R => {
                self.session.restart(now);
            }
            Command::Up | Command::Down | Command::Left | Command::Right => {
                self.session.steer_key(cmd);
            }
        }
    }

    fn handle_click(&mut self, pos: Position, now: Instant) {
        match Hud::new(self.area).hit(pos, self.session.state().status()) {
            Some(Click::Button) => self.press_button(now),
            Some(Click::Control(glyph)) => {
                self.session.steer_glyph(glyph);
            }
            None => (),
        }
    }

    /// Activate whichever of Start and Restart is currently available
    fn press_button(&mut self, now: Instant) {
        if !self.session.start(now) {
            self.session.restart(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameStatus, Pace, Position as Cell};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::backend::TestBackend;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn app() -> App<ChaCha12Rng> {
        let mut app = App::new(Session::new(
            Pace::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        ));
        app.area = Rect::new(0, 0, 80, 24);
        app
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16, button: MouseButton) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(button),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn status(app: &App<ChaCha12Rng>) -> GameStatus {
        app.session.state().status()
    }

    /// Run ticks until the game ends
    fn crash(app: &mut App<ChaCha12Rng>) {
        for _ in 0..100 {
            let Some(deadline) = app.session.deadline() else {
                break;
            };
            app.session.advance(deadline);
        }
        assert_eq!(status(app), GameStatus::GameOver);
    }

    #[rstest]
    #[case(Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)))]
    #[case(Event::Key(KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT)))]
    #[case(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)))]
    fn quit(#[case] ev: Event) {
        let mut app = app();
        app.handle_event(ev, Instant::now());
        assert!(app.quitting);
    }

    #[rstest]
    #[case(KeyCode::Enter)]
    #[case(KeyCode::Char(' '))]
    fn start_by_key(#[case] code: KeyCode) {
        let mut app = app();
        assert_eq!(app.session.deadline(), None);
        app.handle_event(key(code), Instant::now());
        assert_eq!(status(&app), GameStatus::Running);
        assert!(app.session.deadline().is_some());
        assert!(!app.quitting);
    }

    #[test]
    fn r_does_not_start() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('r')), Instant::now());
        assert_eq!(status(&app), GameStatus::NotStarted);
    }

    #[test]
    fn key_release_ignored() {
        let mut app = app();
        let ev = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Enter,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        app.handle_event(ev, Instant::now());
        assert_eq!(status(&app), GameStatus::NotStarted);
    }

    #[rstest]
    #[case(KeyCode::Char('r'))]
    #[case(KeyCode::Enter)]
    fn restart_by_key(#[case] code: KeyCode) {
        let mut app = app();
        let now = Instant::now();
        app.handle_event(key(KeyCode::Enter), now);
        app.handle_event(key(KeyCode::Up), now);
        crash(&mut app);
        app.handle_event(key(code), Instant::now());
        assert_eq!(status(&app), GameStatus::Running);
        assert_eq!(app.session.state().snake().segments().len(), 1);
        assert_eq!(app.session.state().head(), Cell::new(10, 10));
    }

    #[test]
    fn click_start_then_control() {
        let mut app = app();
        let t0 = Instant::now();
        app.handle_event(click(30, 4, MouseButton::Right), t0);
        assert_eq!(status(&app), GameStatus::NotStarted);
        app.handle_event(click(30, 4, MouseButton::Left), t0);
        assert_eq!(status(&app), GameStatus::Running);
        // ▼
        app.handle_event(click(27, 8, MouseButton::Left), t0);
        let deadline = app.session.deadline().unwrap();
        app.session.advance(deadline);
        assert_eq!(app.session.state().head(), Cell::new(10, 11));
    }

    #[test]
    fn click_restart() {
        let mut app = app();
        app.handle_event(key(KeyCode::Enter), Instant::now());
        crash(&mut app);
        app.handle_event(click(31, 4, MouseButton::Left), Instant::now());
        assert_eq!(status(&app), GameStatus::Running);
    }

    #[test]
    fn click_elsewhere_ignored() {
        let mut app = app();
        app.handle_event(click(12, 12, MouseButton::Left), Instant::now());
        assert_eq!(status(&app), GameStatus::NotStarted);
        assert_eq!(app.session.deadline(), None);
    }

    #[test]
    fn draw_records_area() {
        let mut app = app();
        app.area = Rect::default();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        app.draw(&mut terminal).unwrap();
        assert_eq!(app.area, Rect::new(0, 0, 100, 30));
        // The display is centered, so the Start button moves with it
        app.handle_event(click(35, 7, MouseButton::Left), Instant::now());
        assert_eq!(status(&app), GameStatus::Running);
    }
}
