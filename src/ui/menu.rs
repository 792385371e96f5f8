use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::config::Theme;
use crate::input::HitTarget;
use crate::ui::{Button, centered, label_width};

const TITLE: &str = "VEIL / ONE";
const REVEAL_LABEL: &str = "[ reveal ]";
const HINT: &str = "[Enter]/[Space] reveal   [Q] quit";

/// Screen positions of the idle page.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct IdleLayout {
    pub area: Rect,
    pub title: Rect,
    pub reveal: Button,
    pub hint: Rect,
}

impl IdleLayout {
    #[must_use]
    pub fn compute(area: Rect) -> Self {
        let block = centered(area, label_width(HINT).max(label_width(TITLE)), 5);
        let reveal_x = block.x + block.width.saturating_sub(label_width(REVEAL_LABEL)) / 2;

        Self {
            area,
            title: Rect::new(block.x, block.y, block.width, block.height.min(1)),
            reveal: Button::at(REVEAL_LABEL, reveal_x, block.y.saturating_add(2)),
            hint: Rect::new(block.x, block.y.saturating_add(4), block.width, 1),
        }
    }

    /// Only the reveal button reacts to clicks on the idle page.
    #[must_use]
    pub fn hit_test(&self, column: u16, row: u16) -> Option<HitTarget> {
        self.reveal
            .contains(column, row)
            .then_some(HitTarget::RevealButton)
    }
}

/// Draws the idle page: title, reveal button and key hints.
pub fn render_idle_screen(frame: &mut Frame<'_>, layout: &IdleLayout, theme: &Theme) {
    frame.render_widget(
        Block::new().style(Style::new().bg(theme.backdrop_bg)),
        layout.area,
    );

    let visible = frame.area();
    frame.render_widget(
        Paragraph::new(Line::from(TITLE))
            .alignment(Alignment::Center)
            .style(Style::new().fg(theme.text).add_modifier(Modifier::BOLD)),
        layout.title.intersection(visible),
    );

    layout.reveal.render(frame, theme);

    frame.render_widget(
        Paragraph::new(Line::from(HINT))
            .alignment(Alignment::Center)
            .style(Style::new().fg(theme.text_muted)),
        layout.hint.intersection(visible),
    );
}
