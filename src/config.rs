use std::time::Duration;

use ratatui::style::Color;

use crate::error::AppError;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns a square grid with `count` cells per side.
    #[must_use]
    pub fn square(count: u16) -> Self {
        Self {
            width: count,
            height: count,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Colors for the board and the panel chrome around it.
#[derive(Debug)]
pub struct Theme {
    /// Board background.
    pub board_bg: Color,
    /// Alternate tint used when grid lines are enabled.
    pub grid_line: Color,
    pub apple: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    /// Backdrop behind the panel.
    pub backdrop_bg: Color,
    pub panel_border: Color,
    pub text: Color,
    pub text_muted: Color,
    pub button_fg: Color,
    pub button_bg: Color,
}

/// Monochrome palette of the layer.
pub const THEME: Theme = Theme {
    board_bg: Color::Rgb(15, 15, 15),
    grid_line: Color::Rgb(20, 20, 20),
    apple: Color::Rgb(255, 255, 255),
    snake_head: Color::Rgb(255, 255, 255),
    snake_body: Color::Rgb(219, 219, 219),
    backdrop_bg: Color::Rgb(0, 0, 0),
    panel_border: Color::Rgb(200, 200, 200),
    text: Color::Rgb(235, 235, 235),
    text_muted: Color::Rgb(110, 110, 110),
    button_fg: Color::Rgb(0, 0, 0),
    button_bg: Color::Rgb(220, 220, 220),
};

/// Default number of cells per board side.
pub const DEFAULT_GRID_COUNT: u16 = 20;

/// Smallest board that still leaves room to move.
pub const MIN_GRID_COUNT: u16 = 2;

/// Largest board the layout arithmetic supports.
pub const MAX_GRID_COUNT: u16 = 200;

/// Default simulation rate in moves per second.
pub const DEFAULT_UPDATES_PER_SECOND: u32 = 8;

/// Fastest simulation rate accepted; keeps the step interval non-zero.
pub const MAX_UPDATES_PER_SECOND: u32 = 1_000;

/// Poll timeout between frames while the panel is visible.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Poll timeout while the panel is hidden and nothing animates.
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Width-to-height ratio of one terminal character cell.
pub const TERMINAL_CELL_ASPECT: u16 = 2;

/// Largest board cell height in terminal rows.
pub const MAX_CELL_ROWS: u16 = 2;

/// Minimum dominant-axis travel of a swipe, in terminal columns.
pub const SWIPE_MIN_DISTANCE: i32 = 2;

/// Validated runtime configuration for one session.
///
/// Only constructible through [`GameConfig::new`] or `Default`, so every
/// instance has a playable board and a non-zero step interval.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    grid: GridSize,
    updates_per_second: u32,
    grid_lines: bool,
    seed: Option<u64>,
}

impl GameConfig {
    /// Builds a config, rejecting boards and rates the game cannot run with.
    pub fn new(
        grid_count: u16,
        updates_per_second: u32,
        grid_lines: bool,
        seed: Option<u64>,
    ) -> Result<Self, AppError> {
        if !(MIN_GRID_COUNT..=MAX_GRID_COUNT).contains(&grid_count) {
            return Err(AppError::InvalidConfig(format!(
                "grid count must be between {MIN_GRID_COUNT} and {MAX_GRID_COUNT}, got {grid_count}"
            )));
        }

        if !(1..=MAX_UPDATES_PER_SECOND).contains(&updates_per_second) {
            return Err(AppError::InvalidConfig(format!(
                "updates per second must be between 1 and {MAX_UPDATES_PER_SECOND}, \
                 got {updates_per_second}"
            )));
        }

        Ok(Self {
            grid: GridSize::square(grid_count),
            updates_per_second,
            grid_lines,
            seed,
        })
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn updates_per_second(&self) -> u32 {
        self.updates_per_second
    }

    #[must_use]
    pub fn grid_lines(&self) -> bool {
        self.grid_lines
    }

    /// Seed for apple placement; `None` draws from entropy.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the fixed simulation step.
    #[must_use]
    pub fn step_interval(&self) -> Duration {
        Duration::from_secs(1) / self.updates_per_second
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::square(DEFAULT_GRID_COUNT),
            updates_per_second: DEFAULT_UPDATES_PER_SECOND,
            grid_lines: false,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{GameConfig, GridSize};

    #[test]
    fn square_grid_counts_cells() {
        assert_eq!(GridSize::square(20).total_cells(), 400);
    }

    #[test]
    fn default_step_is_one_eighth_second() {
        assert_eq!(
            GameConfig::default().step_interval(),
            Duration::from_millis(125)
        );
    }

    #[test]
    fn config_rejects_degenerate_values() {
        assert!(GameConfig::new(1, 8, false, None).is_err());
        assert!(GameConfig::new(201, 8, false, None).is_err());
        assert!(GameConfig::new(20, 0, false, None).is_err());
        assert!(GameConfig::new(2, 1, true, Some(3)).is_ok());
    }

    #[test]
    fn config_rejects_rates_with_zero_step() {
        assert!(GameConfig::new(20, 1_001, false, None).is_err());
        assert!(GameConfig::new(20, 2_000_000_000, false, Some(1)).is_err());

        let fastest = GameConfig::new(20, 1_000, false, None).expect("fastest rate is valid");
        assert_eq!(fastest.step_interval(), Duration::from_millis(1));
        assert!(!fastest.step_interval().is_zero());
    }
}
