//! Widgets for the catalog screen

mod car_form;
mod car_table;
mod confirm_dialog;
mod filter_bar;
mod help_bar;
mod toasts;

pub use car_form::{CarForm, CarFormState, FormField};
pub use car_table::CarTable;
pub use confirm_dialog::{ConfirmDialog, ConfirmDialogState};
pub use filter_bar::FilterBar;
pub use help_bar::{HelpBar, KeyHint};
pub use toasts::Toasts;
