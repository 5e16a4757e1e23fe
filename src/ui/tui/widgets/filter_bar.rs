//! Filter bar showing the criteria being edited

use crate::ui::tui::state::{AppState, Field, Mode};
use crate::ui::tui::theme::Palette;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// One-line summary of brand, max price, status and sort
pub struct FilterBar<'a> {
    state: &'a AppState,
    palette: &'a Palette,
}

impl<'a> FilterBar<'a> {
    #[must_use]
    pub const fn new(state: &'a AppState, palette: &'a Palette) -> Self {
        Self { state, palette }
    }

    fn field(&self, label: &'a str, value: &'a str, field: Field) -> Vec<Span<'a>> {
        let editing = self.state.mode == Mode::Input(field);
        let value_style = if editing {
            self.palette.selected_style()
        } else {
            Style::default()
        };
        let shown = if value.is_empty() && !editing { "any" } else { value };

        let mut spans = vec![
            Span::styled(label, self.palette.dimmed_style()),
            Span::styled(shown, value_style),
        ];
        if editing {
            spans.push(Span::styled("_", self.palette.accent_style()));
        }
        spans
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let status = self.state.status.map_or("any", |s| s.as_str());

        let mut spans = self.field("Brand: ", &self.state.brand, Field::Brand);
        spans.push(Span::raw("  "));
        spans.extend(self.field("Max price: ", &self.state.max_price, Field::MaxPrice));
        spans.extend([
            Span::raw("  "),
            Span::styled("Status: ", self.palette.dimmed_style()),
            Span::styled(status, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled("Sort: ", self.palette.dimmed_style()),
            Span::styled(
                self.state.sort.label(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border_style())
            .title(" Filters ")
            .style(self.palette.base_style());

        Paragraph::new(Line::from(spans))
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CarStatus;

    fn render(state: &AppState) -> String {
        let palette = Palette::dark();
        let area = Rect::new(0, 0, 100, 3);
        let mut buf = Buffer::empty(area);
        FilterBar::new(state, &palette).render(area, &mut buf);
        (0..area.width).map(|x| buf[(x, 1)].symbol().to_string()).collect()
    }

    #[test]
    fn test_blank_criteria_show_any() {
        let state = AppState::new(Vec::new());
        let line = render(&state);
        assert!(line.contains("Brand: any"));
        assert!(line.contains("Sort: No sorting"));
    }

    #[test]
    fn test_edited_values_are_shown() {
        let mut state = AppState::new(Vec::new());
        state.brand = "bmw".to_string();
        state.status = Some(CarStatus::Sold);
        state.mode = Mode::Input(Field::MaxPrice);

        let line = render(&state);
        assert!(line.contains("Brand: bmw"));
        assert!(line.contains("Max price: _"));
        assert!(line.contains("Status: sold"));
    }
}
