//! Help bar widget for displaying keybind hints

use crate::ui::tui::theme::Palette;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// Key name (e.g., "/", "Enter")
    pub key: String,
    /// Action description (e.g., "brand", "apply")
    pub action: String,
}

impl KeyHint {
    #[must_use]
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    palette: &'a Palette,
}

impl<'a> HelpBar<'a> {
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], palette: &'a Palette) -> Self {
        Self { hints, palette }
    }

    /// Hints for a signed-in user; admins and customers see different actions
    #[must_use]
    pub fn hints_for(is_admin: bool) -> Vec<KeyHint> {
        let mut hints = vec![
            KeyHint::new("/", "brand"),
            KeyHint::new("p", "price"),
            KeyHint::new("s", "status"),
            KeyHint::new("o", "sort"),
            KeyHint::new("Enter", "apply"),
            KeyHint::new("r", "reset"),
        ];
        if is_admin {
            hints.extend([
                KeyHint::new("a", "add"),
                KeyHint::new("e", "edit"),
                KeyHint::new("d", "delete"),
            ]);
        } else {
            hints.push(KeyHint::new("b", "buy"));
        }
        hints.extend([
            KeyHint::new("t", "theme"),
            KeyHint::new("l", "logout"),
            KeyHint::new("?", "help"),
            KeyHint::new("q", "quit"),
        ]);
        hints
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.palette.dimmed_style()));
            }
            spans.push(Span::styled(hint.key.as_str(), self.palette.accent_style()));
            spans.push(Span::styled(":", self.palette.dimmed_style()));
            spans.push(Span::raw(hint.action.as_str()));
        }

        Paragraph::new(Line::from(spans))
            .style(self.palette.base_style())
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_depend_on_role() {
        let admin = HelpBar::hints_for(true);
        let customer = HelpBar::hints_for(false);

        assert!(admin.iter().any(|h| h.action == "delete"));
        assert!(admin.iter().any(|h| h.action == "edit"));
        assert!(!customer.iter().any(|h| h.action == "add"));
        assert!(customer.iter().any(|h| h.action == "logout"));
        assert!(!admin.iter().any(|h| h.action == "buy"));
        assert!(customer.iter().any(|h| h.action == "buy"));
    }

    #[test]
    fn test_render_shows_keys() {
        let hints = vec![KeyHint::new("q", "quit")];
        let palette = Palette::dark();
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);

        HelpBar::new(&hints, &palette).render(area, &mut buf);

        let text: String = (0..area.width).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(text.starts_with("q:quit"));
    }
}
