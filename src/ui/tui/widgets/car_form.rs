//! Listing form for adding and editing cars (admin)
//!
//! Modal overlay with one line per field. Values are kept as text and
//! parsed into a [`CarDraft`] on submit; blank fields are left out of the
//! draft.

use crate::catalog::{Car, CarDraft, CarId, CarStatus, CatalogError};
use crate::ui::tui::theme::Palette;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use std::str::FromStr;

/// Editable fields in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Brand,
    Model,
    Year,
    Price,
    Mileage,
    Color,
    Status,
    Description,
    ImageUrl,
}

impl FormField {
    pub const ALL: [Self; 9] = [
        Self::Brand,
        Self::Model,
        Self::Year,
        Self::Price,
        Self::Mileage,
        Self::Color,
        Self::Status,
        Self::Description,
        Self::ImageUrl,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Brand => "Brand",
            Self::Model => "Model",
            Self::Year => "Year",
            Self::Price => "Price",
            Self::Mileage => "Mileage",
            Self::Color => "Color",
            Self::Status => "Status",
            Self::Description => "Description",
            Self::ImageUrl => "Image URL",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Text of every field plus the listing being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarFormState {
    /// `None` when adding a new listing
    pub target: Option<CarId>,
    values: [String; 9],
    focus: usize,
}

impl CarFormState {
    /// Empty form for a new listing
    #[must_use]
    pub fn new_listing() -> Self {
        Self {
            target: None,
            values: Default::default(),
            focus: 0,
        }
    }

    /// Form prefilled from an existing listing
    #[must_use]
    pub fn for_car(car: &Car) -> Self {
        let mut form = Self::new_listing();
        form.target = Some(car.id);
        form.values = [
            car.brand.clone(),
            car.model.clone(),
            car.year.to_string(),
            car.price.to_string(),
            car.mileage.to_string(),
            car.color.clone().unwrap_or_default(),
            car.status.as_str().to_string(),
            car.description.clone().unwrap_or_default(),
            car.image_url.clone().unwrap_or_default(),
        ];
        form
    }

    #[must_use]
    pub fn title(&self) -> String {
        match self.target {
            Some(id) => format!("Edit car #{id}"),
            None => "New car".to_string(),
        }
    }

    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        &self.values[field.index()]
    }

    #[must_use]
    pub const fn focused(&self) -> FormField {
        FormField::ALL[self.focus]
    }

    /// Text of the focused field
    pub fn focused_mut(&mut self) -> &mut String {
        &mut self.values[self.focus]
    }

    /// Move focus down, wrapping to the first field
    pub const fn next_field(&mut self) {
        self.focus = (self.focus + 1) % FormField::ALL.len();
    }

    /// Move focus up, wrapping to the last field
    pub const fn prev_field(&mut self) {
        self.focus = (self.focus + FormField::ALL.len() - 1) % FormField::ALL.len();
    }

    /// Parse the form into a draft
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for a number or status that does not parse,
    /// or a negative or non-finite price.
    pub fn to_draft(&self) -> Result<CarDraft, CatalogError> {
        let draft = CarDraft {
            brand: self.text(FormField::Brand),
            model: self.text(FormField::Model),
            year: self.number(FormField::Year, "year")?,
            price: self.number(FormField::Price, "price")?,
            mileage: self.number(FormField::Mileage, "mileage")?,
            color: self.text(FormField::Color),
            status: self
                .text(FormField::Status)
                .map(|s| CarStatus::from_str(&s))
                .transpose()?,
            description: self.text(FormField::Description),
            image_url: self.text(FormField::ImageUrl),
        };
        draft.validate()?;
        Ok(draft)
    }

    fn text(&self, field: FormField) -> Option<String> {
        let value = self.value(field).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn number<T: FromStr>(
        &self,
        field: FormField,
        name: &'static str,
    ) -> Result<Option<T>, CatalogError> {
        self.text(field)
            .map(|text| {
                text.parse().map_err(|_| CatalogError::InvalidField {
                    field: name,
                    reason: format!("'{text}' is not a number"),
                })
            })
            .transpose()
    }
}

/// Form overlay widget
pub struct CarForm<'a> {
    state: &'a CarFormState,
    palette: &'a Palette,
}

impl<'a> CarForm<'a> {
    #[must_use]
    pub const fn new(state: &'a CarFormState, palette: &'a Palette) -> Self {
        Self { state, palette }
    }
}

impl Widget for CarForm<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 60.min(area.width);
        let height = (FormField::ALL.len() as u16 + 4).min(area.height);
        let modal_area = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        Clear.render(modal_area, buf);

        let mut lines: Vec<Line> = FormField::ALL
            .iter()
            .map(|&field| {
                let focused = field == self.state.focused();
                let label = Span::styled(
                    format!("{:>12}: ", field.label()),
                    self.palette.dimmed_style(),
                );
                let value = if focused {
                    Span::styled(
                        format!("{}_", self.state.value(field)),
                        self.palette.selected_style(),
                    )
                } else {
                    Span::raw(self.state.value(field))
                };
                Line::from(vec![label, value])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Tab next  Shift-Tab back  Enter save  Esc cancel",
            self.palette.dimmed_style(),
        )));

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.palette.accent_style().add_modifier(Modifier::BOLD))
                    .title(format!(" {} ", self.state.title()))
                    .title_alignment(Alignment::Center)
                    .style(self.palette.base_style()),
            )
            .render(modal_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::toyota_and_bmw;

    #[test]
    fn test_prefilled_from_car() {
        let bmw = &toyota_and_bmw()[1];
        let form = CarFormState::for_car(bmw);

        assert_eq!(form.target, Some(bmw.id));
        assert_eq!(form.value(FormField::Brand), "BMW");
        assert_eq!(form.value(FormField::Price), "5000000");
        assert_eq!(form.value(FormField::Status), "available");
        assert_eq!(form.title(), format!("Edit car #{}", bmw.id));
    }

    #[test]
    fn test_blank_fields_are_left_out() {
        let mut form = CarFormState::new_listing();
        form.focused_mut().push_str("Lada");
        form.next_field();
        form.next_field();
        form.focused_mut().push_str("1999");

        let draft = form.to_draft().unwrap();
        assert_eq!(draft.brand.as_deref(), Some("Lada"));
        assert_eq!(draft.model, None);
        assert_eq!(draft.year, Some(1999));
        assert_eq!(draft.price, None);
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let mut form = CarFormState::new_listing();
        while form.focused() != FormField::Mileage {
            form.next_field();
        }
        form.focused_mut().push_str("lots");
        assert!(form.to_draft().is_err());

        form.focused_mut().clear();
        form.prev_field();
        form.focused_mut().push_str("-1");
        assert!(form.to_draft().is_err());

        form.focused_mut().clear();
        while form.focused() != FormField::Status {
            form.next_field();
        }
        form.focused_mut().push_str("leased");
        assert!(form.to_draft().is_err());
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = CarFormState::new_listing();
        form.prev_field();
        assert_eq!(form.focused(), FormField::ImageUrl);
        form.next_field();
        assert_eq!(form.focused(), FormField::Brand);
    }

    #[test]
    fn test_render_shows_fields() {
        let form = CarFormState::for_car(&toyota_and_bmw()[0]);
        let palette = Palette::light();
        let area = Rect::new(0, 0, 70, 16);
        let mut buf = Buffer::empty(area);

        CarForm::new(&form, &palette).render(area, &mut buf);

        let screen: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(screen.contains("Edit car"));
        assert!(screen.contains("Toyota_"));
        assert!(screen.contains("Image URL"));
    }
}
