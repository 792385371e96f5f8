use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use crate::config::{GridSize, MAX_CELL_ROWS, TERMINAL_CELL_ASPECT, Theme};
use crate::game::GridState;
use crate::snake::Position;

/// One drawing instruction produced from the board state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DrawCommand {
    /// Wipe the board area.
    Clear,
    /// Paint the board background.
    FillBackground,
    /// Tint alternate cells so the grid is faintly visible.
    GridLines,
    Apple(Position),
    /// One snake cell; `head` marks the leading segment.
    Segment { position: Position, head: bool },
}

/// Toggles for optional board decorations.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct RenderOptions {
    pub grid_lines: bool,
}

/// Target that can execute draw commands.
pub trait Surface {
    fn execute(&mut self, command: DrawCommand);
}

/// Translates immutable board state into an ordered command list.
#[must_use]
pub fn draw_commands(state: &GridState, options: RenderOptions) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(state.snake.len() + 4);
    commands.push(DrawCommand::Clear);
    commands.push(DrawCommand::FillBackground);
    if options.grid_lines {
        commands.push(DrawCommand::GridLines);
    }
    commands.push(DrawCommand::Apple(state.apple.position));
    commands.extend(
        state
            .snake
            .segments()
            .enumerate()
            .map(|(index, position)| DrawCommand::Segment {
                position: *position,
                head: index == 0,
            }),
    );
    commands
}

/// Renders the board onto any surface.
pub fn render<S: Surface + ?Sized>(state: &GridState, options: RenderOptions, surface: &mut S) {
    for command in draw_commands(state, options) {
        surface.execute(command);
    }
}

/// Placement of the logical grid on the terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Viewport {
    pub x: u16,
    pub y: u16,
    pub cell_cols: u16,
    pub cell_rows: u16,
    pub bounds: GridSize,
}

impl Viewport {
    /// Sizes cells to the largest square that fits `area` and centers the board.
    ///
    /// Cells never shrink below one row; a board larger than `area` is clipped
    /// when painted.
    #[must_use]
    pub fn fit(area: Rect, bounds: GridSize) -> Self {
        let by_height = area.height / bounds.height.max(1);
        let by_width = area.width / bounds.width.max(1).saturating_mul(TERMINAL_CELL_ASPECT);
        let cell_rows = by_height.min(by_width).clamp(1, MAX_CELL_ROWS);
        let cell_cols = cell_rows * TERMINAL_CELL_ASPECT;

        let board_width = bounds.width.saturating_mul(cell_cols);
        let board_height = bounds.height.saturating_mul(cell_rows);

        Self {
            x: area.x + area.width.saturating_sub(board_width) / 2,
            y: area.y + area.height.saturating_sub(board_height) / 2,
            cell_cols,
            cell_rows,
            bounds,
        }
    }

    /// Returns the terminal rectangle covered by the whole board.
    #[must_use]
    pub fn board_rect(&self) -> Rect {
        Rect::new(
            self.x,
            self.y,
            self.bounds.width.saturating_mul(self.cell_cols),
            self.bounds.height.saturating_mul(self.cell_rows),
        )
    }

    /// Returns the terminal rectangle of one logical cell.
    #[must_use]
    pub fn cell_rect(&self, position: Position) -> Option<Rect> {
        if !position.is_within_bounds(self.bounds) {
            return None;
        }

        let column = u16::try_from(position.x).ok()?;
        let row = u16::try_from(position.y).ok()?;

        Some(Rect::new(
            self.x.saturating_add(column.saturating_mul(self.cell_cols)),
            self.y.saturating_add(row.saturating_mul(self.cell_rows)),
            self.cell_cols,
            self.cell_rows,
        ))
    }
}

/// Paints draw commands into a ratatui buffer.
pub struct BufferSurface<'a> {
    buffer: &'a mut Buffer,
    viewport: Viewport,
    clip: Rect,
    theme: &'a Theme,
}

impl<'a> BufferSurface<'a> {
    /// Creates a surface that never paints outside `clip`.
    pub fn new(buffer: &'a mut Buffer, viewport: Viewport, clip: Rect, theme: &'a Theme) -> Self {
        let clip = clip.intersection(buffer.area);
        Self {
            buffer,
            viewport,
            clip,
            theme,
        }
    }

    fn board_area(&self) -> Rect {
        self.viewport.board_rect().intersection(self.clip)
    }

    /// Fills a cell as a block with a half-column gap on its right edge.
    fn fill_cell(&mut self, position: Position, color: Color) {
        let Some(rect) = self.viewport.cell_rect(position) else {
            return;
        };

        let gap_column = rect.right().saturating_sub(1);
        let area = rect.intersection(self.clip);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    let symbol = if x == gap_column { "▌" } else { "█" };
                    cell.set_symbol(symbol)
                        .set_fg(color)
                        .set_bg(self.theme.board_bg);
                }
            }
        }
    }
}

impl Surface for BufferSurface<'_> {
    fn execute(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Clear => {
                let area = self.board_area();
                for y in area.top()..area.bottom() {
                    for x in area.left()..area.right() {
                        if let Some(cell) = self.buffer.cell_mut((x, y)) {
                            cell.reset();
                        }
                    }
                }
            }
            DrawCommand::FillBackground => {
                let area = self.board_area();
                self.buffer
                    .set_style(area, Style::new().bg(self.theme.board_bg));
            }
            DrawCommand::GridLines => {
                let bounds = self.viewport.bounds;
                for y in 0..i32::from(bounds.height) {
                    for x in (0..i32::from(bounds.width)).filter(|x| (x + y) % 2 == 1) {
                        let Some(rect) = self.viewport.cell_rect(Position { x, y }) else {
                            continue;
                        };
                        let area = rect.intersection(self.clip);
                        self.buffer
                            .set_style(area, Style::new().bg(self.theme.grid_line));
                    }
                }
            }
            DrawCommand::Apple(position) => self.fill_cell(position, self.theme.apple),
            DrawCommand::Segment { position, head } => {
                let color = if head {
                    self.theme.snake_head
                } else {
                    self.theme.snake_body
                };
                self.fill_cell(position, color);
            }
        }
    }
}
