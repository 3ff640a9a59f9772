use crate::consts;
use crate::game::{Direction, GameStatus, Position};
use crate::session::Session;
use crate::util::get_display_area;
use ratatui::{
    buffer::Buffer,
    layout::{self, Constraint, Flex, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

/// The screen layout for a given frame area.
///
/// Both drawing and mouse hit-testing go through this so that clicks land on
/// what was drawn.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Hud {
    score_bar: Rect,
    /// The board including its border
    board: Rect,
    headline: Rect,
    detail: Rect,
    button: Rect,
    pad: Rect,
    footer: Rect,
}

impl Hud {
    const BOARD_BLOCK_SIZE: u16 = consts::BOARD_SIZE + 2;

    pub(crate) fn new(area: Rect) -> Hud {
        let display = get_display_area(area);
        let [score_bar, body, footer] = Layout::vertical([1, Self::BOARD_BLOCK_SIZE, 1])
            .flex(Flex::Start)
            .areas(display);
        let [_, board, _, panel] = Layout::horizontal([
            Constraint::Length(1),
            Constraint::Length(Self::BOARD_BLOCK_SIZE),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .flex(Flex::Start)
        .areas(body);
        let [headline, detail, _, button, _, pad] =
            Layout::vertical([1, 1, 1, 1, 1, ControlPad::HEIGHT])
                .flex(Flex::Start)
                .areas(panel);
        let [pad] = Layout::horizontal([ControlPad::WIDTH])
            .flex(Flex::Start)
            .areas(pad);
        Hud {
            score_bar,
            board,
            headline,
            detail,
            button,
            pad,
            footer,
        }
    }

    /// The area inside the board's border, one terminal cell per board cell
    fn level(&self) -> Rect {
        self.board.inner(Margin::new(1, 1))
    }

    /// The clickable area of the lifecycle button shown for `status`, if any
    fn button_area(&self, status: GameStatus) -> Option<Rect> {
        let button = Button::for_status(status)?;
        let width = u16::try_from(button.to_line().width()).unwrap_or(u16::MAX);
        Some(Rect {
            width: width.min(self.button.width),
            ..self.button
        })
    }

    /// Determine what, if anything, was clicked on at `pos`
    pub(crate) fn hit(&self, pos: layout::Position, status: GameStatus) -> Option<Click> {
        if self.button_area(status).is_some_and(|r| r.contains(pos)) {
            return Some(Click::Button);
        }
        ControlPad::glyph_at(self.pad, pos).map(Click::Control)
    }
}

/// Something on the screen that responds to a mouse click
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Click {
    /// The Start or Restart button, whichever is showing
    Button,
    /// An on-screen steering control, identified by its glyph
    Control(char),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Button {
    Start,
    Restart,
}

impl Button {
    fn for_status(status: GameStatus) -> Option<Button> {
        match status {
            GameStatus::NotStarted => Some(Button::Start),
            GameStatus::Running => None,
            GameStatus::GameOver => Some(Button::Restart),
        }
    }

    fn to_line(self) -> Line<'static> {
        let (label, key) = match self {
            Button::Start => ("Start", "Enter"),
            Button::Restart => ("Restart", "r"),
        };
        Line::from_iter([
            Span::styled(format!("[{label} ("), consts::BUTTON_STYLE),
            Span::styled(key, consts::KEY_STYLE.patch(consts::BUTTON_STYLE)),
            Span::styled(")]", consts::BUTTON_STYLE),
        ])
    }
}

/// The four on-screen steering controls, arranged in a cross:
///
/// ```text
///   ▲
/// ◀   ▶
///   ▼
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ControlPad;

impl ControlPad {
    pub(crate) const WIDTH: u16 = 5;
    pub(crate) const HEIGHT: u16 = 3;

    /// Each control's direction and its offset within the pad
    const CONTROLS: [(Direction, u16, u16); 4] = [
        (Direction::Up, 2, 0),
        (Direction::Left, 0, 1),
        (Direction::Right, 4, 1),
        (Direction::Down, 2, 2),
    ];

    /// The screen cell at offset `(dx, dy)` within `area`, if it's inside
    fn control_cell(area: Rect, dx: u16, dy: u16) -> Option<layout::Position> {
        if dx >= area.width || dy >= area.height {
            return None;
        }
        let x = area.x.saturating_add(dx);
        let y = area.y.saturating_add(dy);
        Some(layout::Position::new(x, y))
    }

    fn glyph_at(area: Rect, pos: layout::Position) -> Option<char> {
        Self::CONTROLS
            .iter()
            .find(|c| Self::control_cell(area, c.1, c.2) == Some(pos))
            .map(|&(d, _, _)| d.glyph())
    }
}

impl Widget for ControlPad {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (d, dx, dy) in Self::CONTROLS {
            let Some(pos) = Self::control_cell(area, dx, dy) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char(d.glyph());
                cell.set_style(consts::CONTROL_STYLE);
            }
        }
    }
}

impl<R> Widget for &Session<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hud = Hud::new(area);
        let state = self.state();
        let status = state.status();

        Line::styled(
            format!(" Score: {}", state.score()),
            consts::SCORE_BAR_STYLE,
        )
        .render(hud.score_bar, buf);

        Block::bordered().render(hud.board, buf);
        let mut level = Canvas {
            area: hud.level(),
            buf,
        };
        level.draw_cell(state.apple(), consts::APPLE_SYMBOL, consts::APPLE_STYLE);
        for &p in state.snake().segments().iter().skip(1) {
            level.draw_cell(p, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if status == GameStatus::GameOver {
            level.draw_cell(
                state.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        } else {
            level.draw_cell(
                state.head(),
                head_symbol(state.direction()),
                consts::SNAKE_STYLE,
            );
        }

        match status {
            GameStatus::NotStarted => {
                Span::from("Ready when you are").render(hud.headline, buf);
                speed_line(self).render(hud.detail, buf);
            }
            GameStatus::Running => speed_line(self).render(hud.detail, buf),
            GameStatus::GameOver => {
                Span::from("— GAME OVER —").render(hud.headline, buf);
                Span::from(format!("Your score: {}", state.score())).render(hud.detail, buf);
            }
        }
        if let (Some(button), Some(button_area)) =
            (Button::for_status(status), hud.button_area(status))
        {
            button.to_line().render(button_area, buf);
        }
        ControlPad.render(hud.pad, buf);

        Line::from_iter([
            Span::raw(" Steer ("),
            Span::styled("←↑↓→", consts::KEY_STYLE),
            Span::raw(" or click ▲▼◀▶) — Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .render(hud.footer, buf);
    }
}

fn speed_line<R>(session: &Session<R>) -> Span<'static> {
    Span::from(format!("Speed: {} ms", session.state().speed().as_millis()))
}

/// Return the glyph to use for drawing the snake's head
fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_NORTH_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_SOUTH_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_EAST_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_WEST_SYMBOL,
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let (Ok(x), Ok(y)) = (u16::try_from(pos.x), u16::try_from(pos.y)) else {
            return;
        };
        if x >= self.area.width || y >= self.area.height {
            return;
        }
        let Some(x) = self.area.x.checked_add(x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::game::{Pace, TickEvent};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::time::Instant;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn session() -> Session<ChaCha12Rng> {
        Session::new(Pace::default(), ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn render(session: &Session<ChaCha12Rng>) -> Buffer {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        session.render(area, &mut buffer);
        buffer
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    fn symbol_at(buffer: &Buffer, x: u16, y: u16) -> &str {
        buffer[(x, y)].symbol()
    }

    /// Screen coordinates of a board position in an 80×24 frame
    fn screen(pos: Position) -> (u16, u16) {
        (
            u16::try_from(pos.x + 2).unwrap(),
            u16::try_from(pos.y + 2).unwrap(),
        )
    }

    #[test]
    fn layout() {
        let hud = Hud::new(Rect::new(0, 0, 80, 24));
        assert_eq!(hud.score_bar, Rect::new(0, 0, 80, 1));
        assert_eq!(hud.board, Rect::new(1, 1, 22, 22));
        assert_eq!(hud.level(), Rect::new(2, 2, 20, 20));
        assert_eq!(hud.headline, Rect::new(25, 1, 55, 1));
        assert_eq!(hud.detail, Rect::new(25, 2, 55, 1));
        assert_eq!(hud.button, Rect::new(25, 4, 55, 1));
        assert_eq!(hud.pad, Rect::new(25, 6, 5, 3));
        assert_eq!(hud.footer, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn control_pad() {
        let area = Rect::new(0, 0, 5, 3);
        let mut buffer = Buffer::empty(area);
        ControlPad.render(area, &mut buffer);
        let mut expected = Buffer::with_lines(["  ▲  ", "◀   ▶", "  ▼  "]);
        expected.set_style(Rect::new(2, 0, 1, 1), consts::CONTROL_STYLE);
        expected.set_style(Rect::new(0, 1, 1, 1), consts::CONTROL_STYLE);
        expected.set_style(Rect::new(4, 1, 1, 1), consts::CONTROL_STYLE);
        expected.set_style(Rect::new(2, 2, 1, 1), consts::CONTROL_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn draw_new_game() {
        let session = session();
        let buffer = render(&session);
        assert!(row(&buffer, 0).starts_with(" Score: 0 "));
        assert_eq!(symbol_at(&buffer, 1, 1), "┌");
        assert_eq!(symbol_at(&buffer, 22, 22), "┘");
        let (hx, hy) = screen(Position::new(10, 10));
        assert_eq!((hx, hy), (12, 12));
        assert_eq!(symbol_at(&buffer, hx, hy), "<");
        assert_eq!(buffer[(hx, hy)].fg, consts::SNAKE_STYLE.fg.unwrap());
        let (ax, ay) = screen(session.state().apple());
        assert_eq!(symbol_at(&buffer, ax, ay), "●");
        assert!(row(&buffer, 1).contains("Ready when you are"));
        assert!(row(&buffer, 2).contains("Speed: 500 ms"));
        assert!(row(&buffer, 4).contains("[Start (Enter)]"));
        assert!(!row(&buffer, 4).contains("Restart"));
        assert_eq!(symbol_at(&buffer, 27, 6), "▲");
        assert_eq!(symbol_at(&buffer, 25, 7), "◀");
        assert_eq!(symbol_at(&buffer, 29, 7), "▶");
        assert_eq!(symbol_at(&buffer, 27, 8), "▼");
        assert!(row(&buffer, 23).starts_with(" Steer ("));
    }

    #[test]
    fn draw_running_game() {
        let mut session = session();
        session.set_apple(Position::new(10, 11));
        let t0 = Instant::now();
        assert!(session.start(t0));
        assert!(session.steer_key(Command::Down));
        let event = session.advance(t0 + consts::INITIAL_SPEED);
        assert!(matches!(event, Some(TickEvent::Ate { .. })));
        let buffer = render(&session);
        let (hx, hy) = screen(session.state().head());
        assert_eq!((hx, hy), (12, 13));
        assert_eq!(symbol_at(&buffer, hx, hy), "^");
        assert_eq!(symbol_at(&buffer, 12, 12), "⚬");
        let (ax, ay) = screen(session.state().apple());
        assert_eq!(symbol_at(&buffer, ax, ay), "●");
        assert!(row(&buffer, 0).starts_with(" Score: 1 "));
        assert!(!row(&buffer, 1).contains("Ready"));
        assert!(row(&buffer, 2).contains("Speed: 495 ms"));
        assert!(!row(&buffer, 4).contains('['));
    }

    #[test]
    fn draw_game_over() {
        let mut session = session();
        let t0 = Instant::now();
        assert!(session.start(t0));
        assert!(session.steer_key(Command::Left));
        let mut over = false;
        for _ in 0..100 {
            let now = session.deadline().unwrap();
            if matches!(session.advance(now), Some(TickEvent::Collided(_))) {
                over = true;
                break;
            }
        }
        assert!(over);
        let score = session.state().score();
        let buffer = render(&session);
        let (hx, hy) = screen(session.state().head());
        assert_eq!(hx, 2);
        assert_eq!(symbol_at(&buffer, hx, hy), "×");
        assert!(row(&buffer, 0).starts_with(&format!(" Score: {score} ")));
        assert!(row(&buffer, 1).contains("— GAME OVER —"));
        assert!(row(&buffer, 2).contains(&format!("Your score: {score}")));
        assert!(row(&buffer, 4).contains("[Restart (r)]"));
        assert!(!row(&buffer, 4).contains("Start (Enter)"));
    }

    #[test]
    fn hit_buttons() {
        let hud = Hud::new(Rect::new(0, 0, 80, 24));
        let start = layout::Position::new(25, 4);
        assert_eq!(hud.hit(start, GameStatus::NotStarted), Some(Click::Button));
        assert_eq!(
            hud.hit(layout::Position::new(39, 4), GameStatus::NotStarted),
            Some(Click::Button)
        );
        assert_eq!(
            hud.hit(layout::Position::new(40, 4), GameStatus::NotStarted),
            None
        );
        assert_eq!(hud.hit(start, GameStatus::Running), None);
        assert_eq!(hud.hit(start, GameStatus::GameOver), Some(Click::Button));
        assert_eq!(
            hud.hit(layout::Position::new(38, 4), GameStatus::GameOver),
            None
        );
    }

    #[test]
    fn hit_controls_match_drawing() {
        let session = session();
        let buffer = render(&session);
        let hud = Hud::new(buffer.area);
        let mut found = Vec::new();
        for p in buffer.area.positions() {
            if let Some(Click::Control(glyph)) = hud.hit(p, GameStatus::Running) {
                assert_eq!(buffer[p].symbol(), glyph.to_string());
                found.push(glyph);
            }
        }
        assert_eq!(found, ['▲', '◀', '▶', '▼']);
        assert_eq!(
            hud.hit(layout::Position::new(26, 7), GameStatus::Running),
            None
        );
    }
}
