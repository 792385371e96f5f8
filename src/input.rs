use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use log::trace;

use crate::config::{SWIPE_MIN_DISTANCE, TERMINAL_CELL_ASPECT};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in on-screen pad order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Left, Self::Down, Self::Right];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the unit vector of this direction; y grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Reset,
    Reveal,
    Close,
    /// Leave the program from the idle page.
    Quit,
    /// Leave the program from any phase.
    Interrupt,
}

/// Screen element under a mouse press, resolved by the UI layouts.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum HitTarget {
    RevealButton,
    CloseButton,
    ResetButton,
    DirectionButton(Direction),
    Board,
    /// Inside the panel but not on any control.
    Panel,
    /// Outside the panel.
    Backdrop,
}

/// Returns whether a proposed turn changes motion: repeats and 180° turns are rejected.
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current && next != current.opposite()
}

/// Resolves a drag from `start` to `end` (column, row) into a direction.
///
/// Rows are scaled by the terminal cell aspect so both axes are compared in
/// column units. Returns `None` when the dominant travel is too short.
#[must_use]
pub fn swipe_direction(start: (u16, u16), end: (u16, u16)) -> Option<Direction> {
    let dx = i32::from(end.0) - i32::from(start.0);
    let dy = (i32::from(end.1) - i32::from(start.1)) * i32::from(TERMINAL_CELL_ASPECT);
    let (abs_x, abs_y) = (dx.abs(), dy.abs());

    if abs_x.max(abs_y) < SWIPE_MIN_DISTANCE {
        return None;
    }

    if abs_x > abs_y {
        Some(if dx > 0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0 { Direction::Down } else { Direction::Up })
    }
}

/// Maps raw terminal events to [`GameInput`], tracking in-flight swipes.
#[derive(Debug, Default)]
pub struct InputMapper {
    swipe_start: Option<(u16, u16)>,
}

impl InputMapper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps one key event. Releases, repeats and unmapped keys yield `None`.
    #[must_use]
    pub fn map_key(&self, key: KeyEvent) -> Option<GameInput> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(GameInput::Interrupt);
        }

        let input = match key.code {
            KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
            KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
            KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
            KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
            KeyCode::Char('r' | 'R') => GameInput::Reset,
            KeyCode::Enter | KeyCode::Char(' ') => GameInput::Reveal,
            KeyCode::Esc => GameInput::Close,
            KeyCode::Char('q' | 'Q') => GameInput::Quit,
            _ => return None,
        };

        Some(input)
    }

    /// Maps one mouse event; `target` is the element under the pointer.
    ///
    /// A left press on the board starts a swipe that the matching release
    /// resolves. Presses elsewhere activate the control they land on.
    pub fn map_mouse(
        &mut self,
        event: MouseEvent,
        target: Option<HitTarget>,
    ) -> Option<GameInput> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe_start = None;
                match target? {
                    HitTarget::RevealButton => Some(GameInput::Reveal),
                    HitTarget::CloseButton | HitTarget::Backdrop => Some(GameInput::Close),
                    HitTarget::ResetButton => Some(GameInput::Reset),
                    HitTarget::DirectionButton(direction) => Some(GameInput::Direction(direction)),
                    HitTarget::Board => {
                        self.swipe_start = Some((event.column, event.row));
                        None
                    }
                    HitTarget::Panel => None,
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let start = self.swipe_start.take()?;
                let direction = swipe_direction(start, (event.column, event.row));
                trace!(
                    "swipe {start:?} -> ({}, {}) resolved to {direction:?}",
                    event.column, event.row
                );
                direction.map(GameInput::Direction)
            }
            _ => None,
        }
    }
}
