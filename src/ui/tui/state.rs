//! State of the catalog screen that the view controller does not own
//!
//! The cursor, the editable filter bar and the open dialog live here; the
//! listings and notifications stay in the controller.

use super::widgets::{CarFormState, ConfirmDialogState, KeyHint};
use crate::catalog::{CarId, CarStatus, CatalogError};
use crate::search::{FilterCriteria, SortKey};

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Keys are commands
    Normal,
    /// Keys edit a filter field
    Input(Field),
    /// A delete is waiting for yes or no
    Confirm,
    /// The listing form is open
    Form,
    /// The key list is shown
    Help,
}

/// Editable text fields of the filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Brand,
    MaxPrice,
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub mode: Mode,
    /// Row under the cursor in the displayed list
    pub cursor: usize,
    /// Brand filter text
    pub brand: String,
    /// Max price filter text, parsed on apply
    pub max_price: String,
    pub status: Option<CarStatus>,
    pub sort: SortKey,
    /// Delete waiting for confirmation
    pub confirm: Option<(CarId, ConfirmDialogState)>,
    /// Add or edit form
    pub form: Option<CarFormState>,
    pub hints: Vec<KeyHint>,
}

impl AppState {
    #[must_use]
    pub fn new(hints: Vec<KeyHint>) -> Self {
        Self {
            mode: Mode::Normal,
            cursor: 0,
            brand: String::new(),
            max_price: String::new(),
            status: None,
            sort: SortKey::None,
            confirm: None,
            form: None,
            hints,
        }
    }

    pub const fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub const fn jump_to_start(&mut self) {
        self.cursor = 0;
    }

    pub const fn jump_to_end(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
    }

    /// Keep the cursor inside a list that may have shrunk
    pub const fn clamp(&mut self, len: usize) {
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    /// Any status, then each status in turn
    pub fn cycle_status(&mut self) {
        self.status = match self.status {
            None => Some(CarStatus::ALL[0]),
            Some(current) => CarStatus::ALL
                .iter()
                .position(|s| *s == current)
                .and_then(|i| CarStatus::ALL.get(i + 1).copied()),
        };
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
    }

    /// Text of the field being edited
    pub fn input_mut(&mut self) -> Option<&mut String> {
        match self.mode {
            Mode::Input(Field::Brand) => Some(&mut self.brand),
            Mode::Input(Field::MaxPrice) => Some(&mut self.max_price),
            Mode::Form => self.form.as_mut().map(CarFormState::focused_mut),
            _ => None,
        }
    }

    /// Criteria described by the filter bar
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidField` if the max price is not a
    /// non-negative number.
    pub fn criteria(&self) -> Result<FilterCriteria, CatalogError> {
        Ok(FilterCriteria {
            brand: self.brand.clone(),
            max_price: FilterCriteria::parse_max_price(&self.max_price)?,
            status: self.status,
        })
    }

    /// Clear the filter bar after a reset
    pub fn clear_filters(&mut self) {
        self.brand.clear();
        self.max_price.clear();
        self.status = None;
        self.sort = SortKey::None;
        self.cursor = 0;
    }

    /// Open the delete dialog for `id`
    pub fn ask_delete(&mut self, id: CarId, prompt: String) {
        let dialog = ConfirmDialogState::new("Delete car", prompt);
        self.confirm = Some((id, dialog));
        self.mode = Mode::Confirm;
    }

    /// Open the add or edit form
    pub fn open_form(&mut self, form: CarFormState) {
        self.form = Some(form);
        self.mode = Mode::Form;
    }

    /// Close the form, discarding its text
    pub fn close_form(&mut self) -> Option<CarFormState> {
        self.mode = Mode::Normal;
        self.form.take()
    }

    /// Close the delete dialog, returning the car it was about
    pub fn take_confirm(&mut self) -> Option<CarId> {
        self.mode = Mode::Normal;
        self.confirm.take().map(|(id, _)| id)
    }
}
