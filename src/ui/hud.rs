use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::{GridSize, Theme};
use crate::game::GridState;
use crate::input::{Direction, HitTarget};
use crate::renderer::{self, BufferSurface, RenderOptions, Viewport};
use crate::ui::{Button, centered, inset, label_width, rect_contains};

const TITLE: &str = " VEIL / ONE ";
const CLOSE_LABEL: &str = "[ x ]";
const RESET_LABEL: &str = "[ reset ]";
const HEADER_HINT: &str = "[Esc] close  [R] reset";
const PAD_GAP: u16 = 1;
const MIN_PANEL_INNER_WIDTH: u16 = 28;

/// Header, status and direction pad rows around the board.
const CHROME_ROWS: u16 = 3;

fn pad_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "[▲]",
        Direction::Left => "[◀]",
        Direction::Down => "[▼]",
        Direction::Right => "[▶]",
    }
}

/// Screen positions of the visible layer and its controls.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PanelLayout {
    /// Whole terminal area the layer was laid out for.
    pub area: Rect,
    pub panel: Rect,
    pub header: Rect,
    pub board_area: Rect,
    pub viewport: Viewport,
    pub status: Rect,
    pub close: Button,
    pub reset: Button,
    pub pad: [(Direction, Button); 4],
}

impl PanelLayout {
    /// Lays the panel out for `area`; only cell size depends on the area.
    #[must_use]
    pub fn compute(area: Rect, bounds: GridSize) -> Self {
        let outer = inset(area, 2, 1);
        let available = Rect::new(
            0,
            0,
            outer.width.saturating_sub(2),
            outer.height.saturating_sub(2 + CHROME_ROWS),
        );
        let board = Viewport::fit(available, bounds).board_rect();

        let panel = centered(
            outer,
            board.width.max(MIN_PANEL_INNER_WIDTH) + 2,
            board.height + CHROME_ROWS + 2,
        );
        let inner = inset(panel, 1, 1);

        let header = Rect::new(inner.x, inner.y, inner.width, inner.height.min(1));
        let board_area = Rect::new(
            inner.x,
            inner.y.saturating_add(1),
            inner.width,
            inner.height.saturating_sub(CHROME_ROWS),
        );
        let viewport = Viewport::fit(board_area, bounds);

        let status_y = board_area.bottom();
        let pad_y = status_y.saturating_add(1);
        let status = Rect::new(inner.x, status_y, inner.width, 1);

        let close = Button::at(
            CLOSE_LABEL,
            inner.right().saturating_sub(label_width(CLOSE_LABEL)),
            inner.y,
        );
        let reset = Button::at(
            RESET_LABEL,
            inner.right().saturating_sub(label_width(RESET_LABEL)),
            status_y,
        );

        let pad_width = Direction::ALL
            .iter()
            .map(|direction| label_width(pad_label(*direction)))
            .sum::<u16>()
            + PAD_GAP * 3;
        let mut x = inner.x + inner.width.saturating_sub(pad_width) / 2;
        let pad = Direction::ALL.map(|direction| {
            let button = Button::at(pad_label(direction), x, pad_y);
            x = button.area.right() + PAD_GAP;
            (direction, button)
        });

        Self {
            area,
            panel,
            header,
            board_area,
            viewport,
            status,
            close,
            reset,
            pad,
        }
    }

    /// Resolves what a press at (`column`, `row`) lands on.
    #[must_use]
    pub fn hit_test(&self, column: u16, row: u16) -> HitTarget {
        if self.close.contains(column, row) {
            return HitTarget::CloseButton;
        }

        if self.reset.contains(column, row) {
            return HitTarget::ResetButton;
        }

        if let Some((direction, _)) = self
            .pad
            .iter()
            .find(|(_, button)| button.contains(column, row))
        {
            return HitTarget::DirectionButton(*direction);
        }

        let board = self.viewport.board_rect().intersection(self.board_area);
        if rect_contains(board, column, row) {
            return HitTarget::Board;
        }

        if rect_contains(self.panel, column, row) {
            HitTarget::Panel
        } else {
            HitTarget::Backdrop
        }
    }
}

/// Draws the layer: backdrop, bordered panel, board, score and controls.
pub fn render_panel(
    frame: &mut Frame<'_>,
    layout: &PanelLayout,
    state: &GridState,
    options: RenderOptions,
    theme: &Theme,
) {
    let visible = frame.area();

    frame.render_widget(
        Block::new().style(Style::new().bg(theme.backdrop_bg)),
        layout.area.intersection(visible),
    );

    let panel = layout.panel.intersection(visible);
    frame.render_widget(Clear, panel);
    frame.render_widget(
        Block::bordered()
            .title(TITLE)
            .border_style(Style::new().fg(theme.panel_border))
            .style(Style::new().bg(theme.backdrop_bg)),
        panel,
    );

    frame.render_widget(
        Paragraph::new(Line::from(HEADER_HINT)).style(Style::new().fg(theme.text_muted)),
        layout.header.intersection(visible),
    );
    layout.close.render(frame, theme);

    let mut surface = BufferSurface::new(
        frame.buffer_mut(),
        layout.viewport,
        layout.board_area,
        theme,
    );
    renderer::render(state, options, &mut surface);

    frame.render_widget(
        Paragraph::new(Line::from(format!("Score: {}", state.score)))
            .alignment(Alignment::Left)
            .style(Style::new().fg(theme.text).add_modifier(Modifier::BOLD)),
        layout.status.intersection(visible),
    );
    layout.reset.render(frame, theme);

    for (_, button) in &layout.pad {
        button.render(frame, theme);
    }
}
