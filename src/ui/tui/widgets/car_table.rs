//! Listing table with a cursor row

use crate::catalog::{Car, CarStatus};
use crate::output::format_price;
use crate::ui::tui::theme::Palette;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

/// Table of the displayed listings
pub struct CarTable<'a> {
    cars: &'a [Car],
    cursor: usize,
    palette: &'a Palette,
    title: String,
}

impl<'a> CarTable<'a> {
    #[must_use]
    pub fn new(cars: &'a [Car], cursor: usize, palette: &'a Palette) -> Self {
        Self {
            cars,
            cursor,
            palette,
            title: format!(" Cars ({}) ", cars.len()),
        }
    }

    /// Replace the block title, e.g. while loading
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// First row to draw so the cursor stays visible
    const fn scroll_offset(cursor: usize, visible: usize) -> usize {
        if visible == 0 || cursor < visible {
            0
        } else {
            cursor + 1 - visible
        }
    }

    fn status_style(&self, status: CarStatus) -> Style {
        let color = match status {
            CarStatus::Available => self.palette.success,
            CarStatus::Sold => self.palette.error,
            CarStatus::Reserved => self.palette.warning,
        };
        Style::default().fg(color)
    }
}

impl Widget for CarTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border_style())
            .title(self.title.as_str())
            .style(self.palette.base_style());

        if self.cars.is_empty() {
            Paragraph::new("No cars match the current filters")
                .style(self.palette.dimmed_style())
                .block(block)
                .render(area, buf);
            return;
        }

        // Borders and header take three rows
        let visible = usize::from(area.height.saturating_sub(3));
        let offset = Self::scroll_offset(self.cursor, visible);

        let rows: Vec<Row> = self
            .cars
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible.max(1))
            .map(|(i, car)| {
                let marker = if i == self.cursor { ">" } else { " " };
                let row = Row::new(vec![
                    Cell::from(marker).style(self.palette.accent_style()),
                    Cell::from(car.id.to_string()),
                    Cell::from(car.title()),
                    Cell::from(car.year.to_string()),
                    Cell::from(format_price(car.price)),
                    Cell::from(car.mileage.to_string()),
                    Cell::from(car.color.clone().unwrap_or_else(|| "-".to_string())),
                    Cell::from(car.status.as_str()).style(self.status_style(car.status)),
                ]);
                if i == self.cursor {
                    row.style(self.palette.selected_style())
                } else {
                    row
                }
            })
            .collect();

        let header = Row::new(vec![
            "", "ID", "Car", "Year", "Price", "Mileage", "Color", "Status",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let widths = [
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Min(16),
            Constraint::Length(4),
            Constraint::Length(11),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(9),
        ];

        Table::new(rows, widths)
            .header(header)
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::toyota_and_bmw;

    fn screen(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_scroll_offset_keeps_cursor_visible() {
        assert_eq!(CarTable::scroll_offset(0, 5), 0);
        assert_eq!(CarTable::scroll_offset(4, 5), 0);
        assert_eq!(CarTable::scroll_offset(5, 5), 1);
        assert_eq!(CarTable::scroll_offset(9, 5), 5);
        assert_eq!(CarTable::scroll_offset(3, 0), 0);
    }

    #[test]
    fn test_render_rows_and_cursor() {
        let cars = toyota_and_bmw();
        let palette = Palette::dark();
        let area = Rect::new(0, 0, 80, 6);
        let mut buf = Buffer::empty(area);

        CarTable::new(&cars, 1, &palette).render(area, &mut buf);

        let text = screen(&buf);
        assert!(text.contains("Cars (2)"));
        assert!(text.contains("Toyota"));
        let bmw_line = text.lines().find(|l| l.contains("BMW")).unwrap();
        assert!(bmw_line.contains('>'));
    }

    #[test]
    fn test_render_empty_message() {
        let palette = Palette::light();
        let area = Rect::new(0, 0, 50, 4);
        let mut buf = Buffer::empty(area);

        CarTable::new(&[], 0, &palette).render(area, &mut buf);

        assert!(screen(&buf).contains("No cars match"));
    }
}
