//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Width and height of the (square) board, in cells
pub(crate) const BOARD_SIZE: u16 = 20;

/// Tick interval at the start of every game
pub(crate) const INITIAL_SPEED: Duration = Duration::from_millis(500);

/// How much shorter the tick interval becomes each time an apple is eaten
pub(crate) const SPEED_INCREMENT: Duration = Duration::from_millis(5);

/// The tick interval never drops below this
pub(crate) const MIN_SPEED: Duration = Duration::from_millis(50);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the apple
pub(crate) const APPLE_SYMBOL: char = '●';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// On-screen control for steering up
pub(crate) const CONTROL_UP_GLYPH: char = '▲';

/// On-screen control for steering down
pub(crate) const CONTROL_DOWN_GLYPH: char = '▼';

/// On-screen control for steering left
pub(crate) const CONTROL_LEFT_GLYPH: char = '◀';

/// On-screen control for steering right
pub(crate) const CONTROL_RIGHT_GLYPH: char = '▶';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the apple
pub(crate) const APPLE_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the on-screen control glyphs
pub(crate) const CONTROL_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the Start/Restart button
pub(crate) const BUTTON_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
