pub mod hud;
pub mod menu;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;

/// Clickable label with its screen rectangle.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Button {
    pub label: &'static str,
    pub area: Rect,
}

impl Button {
    /// Places `label` with its left edge at (`x`, `y`).
    #[must_use]
    pub fn at(label: &'static str, x: u16, y: u16) -> Self {
        Self {
            label,
            area: Rect::new(x, y, label_width(label), 1),
        }
    }

    /// Returns true when the terminal cell (`column`, `row`) is on the button.
    #[must_use]
    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.area, column, row)
    }

    pub fn render(&self, frame: &mut Frame<'_>, theme: &Theme) {
        let area = self.area.intersection(frame.area());
        frame.render_widget(
            Paragraph::new(Line::from(self.label)).style(
                Style::new()
                    .fg(theme.button_fg)
                    .bg(theme.button_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            area,
        );
    }
}

/// Display width of a label in terminal columns.
#[must_use]
pub fn label_width(label: &str) -> u16 {
    u16::try_from(label.width()).unwrap_or(u16::MAX)
}

/// Returns true when (`column`, `row`) lies inside `area`.
#[must_use]
pub fn rect_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.left() && column < area.right() && row >= area.top() && row < area.bottom()
}

/// Returns `area` shrunk by `dx` columns and `dy` rows on each side.
#[must_use]
pub fn inset(area: Rect, dx: u16, dy: u16) -> Rect {
    Rect {
        x: area.x.saturating_add(dx),
        y: area.y.saturating_add(dy),
        width: area.width.saturating_sub(dx.saturating_mul(2)),
        height: area.height.saturating_sub(dy.saturating_mul(2)),
    }
}

/// Returns a `width` × `height` rectangle centered in `area`, clipped to it.
#[must_use]
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{Button, centered, inset, label_width};

    #[test]
    fn button_width_follows_label() {
        let button = Button::at("[ reset ]", 4, 2);

        assert_eq!(button.area, Rect::new(4, 2, 9, 1));
        assert!(button.contains(4, 2));
        assert!(button.contains(12, 2));
        assert!(!button.contains(13, 2));
        assert!(!button.contains(4, 3));
    }

    #[test]
    fn arrow_label_is_single_width() {
        assert_eq!(label_width("[▲]"), 3);
    }

    #[test]
    fn centering_clips_to_area() {
        let area = Rect::new(0, 0, 10, 6);

        assert_eq!(centered(area, 4, 2), Rect::new(3, 2, 4, 2));
        assert_eq!(centered(area, 40, 20), area);
        assert_eq!(inset(area, 2, 1), Rect::new(2, 1, 6, 4));
    }
}
