//! Colour palettes for the terminal UI
//!
//! The palette follows the session's light/dark preference.

use crate::notify::Severity;
use crate::session::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Colours used by every widget
#[derive(Debug, Clone)]
pub struct Palette {
    /// Text colour
    pub foreground: Color,
    /// Screen background
    pub background: Color,
    /// Background of the highlighted row
    pub selection_bg: Color,
    /// Foreground of the highlighted row
    pub selection_fg: Color,
    /// Cursor indicator and key names
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub border: Color,
    /// Secondary text
    pub dimmed: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}

impl Palette {
    /// Palette matching a stored preference
    #[must_use]
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }

    #[must_use]
    pub const fn light() -> Self {
        Self {
            foreground: Color::Black,
            background: Color::White,
            selection_bg: Color::LightBlue,
            selection_fg: Color::Black,
            accent: Color::Blue,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Rgb(180, 120, 0),
            info: Color::Blue,
            border: Color::Gray,
            dimmed: Color::DarkGray,
        }
    }

    #[must_use]
    pub const fn dark() -> Self {
        Self {
            foreground: Color::White,
            background: Color::Black,
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            accent: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Cyan,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
        }
    }

    /// Base style applied to the whole screen
    #[must_use]
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    /// Style for the row under the cursor
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the cursor indicator and key names
    #[must_use]
    pub fn accent_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    /// Style for a notification of the given severity
    #[must_use]
    pub fn severity_style(&self, severity: Severity) -> Style {
        let color = match severity {
            Severity::Success => self.success,
            Severity::Error => self.error,
            Severity::Info => self.info,
        };
        Style::default().fg(color)
    }
}
