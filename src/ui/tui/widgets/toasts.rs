//! Stack of visible notifications in the top-right corner

use crate::notify::{Notification, Severity};
use crate::ui::tui::theme::Palette;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

const MAX_TOASTS: usize = 4;
const TOAST_WIDTH: u16 = 44;

/// Notifications drawn newest first
pub struct Toasts<'a> {
    notifications: Vec<&'a Notification>,
    palette: &'a Palette,
}

impl<'a> Toasts<'a> {
    #[must_use]
    pub const fn new(notifications: Vec<&'a Notification>, palette: &'a Palette) -> Self {
        Self {
            notifications,
            palette,
        }
    }

    const fn prefix(severity: Severity) -> &'static str {
        match severity {
            Severity::Success => "✓ ",
            Severity::Error => "✗ ",
            Severity::Info => "ℹ ",
        }
    }
}

impl Widget for Toasts<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = TOAST_WIDTH.min(area.width);
        let x = area.x + area.width - width;
        let mut y = area.y;

        for notification in self.notifications.iter().rev().take(MAX_TOASTS) {
            if y + 3 > area.y + area.height {
                break;
            }
            let rect = Rect::new(x, y, width, 3);
            let style = self.palette.severity_style(notification.severity);

            Clear.render(rect, buf);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .style(self.palette.base_style());
            let line = Line::from(vec![
                Span::styled(Self::prefix(notification.severity), style),
                Span::raw(notification.message.as_str()),
            ]);
            Paragraph::new(line).block(block).render(rect, buf);

            y += 3;
        }
    }
}
