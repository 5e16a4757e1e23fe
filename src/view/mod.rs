//! The catalog listing view
//!
//! [`ViewController`] is UI-agnostic: the terminal UI and the CLI commands
//! both drive it and render what it exposes.

pub mod controller;
pub mod error;

pub use controller::ViewController;
pub use error::{Result, ViewError};

use crate::catalog::CarId;
use crate::service::ServiceError;
use crate::session::{Session, Theme};

/// Loading state of the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Loaded,
    Error,
}

/// Session and preferences handed to the view at construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewContext {
    pub session: Option<Session>,
    pub theme: Theme,
}

impl ViewContext {
    /// Context for a signed-in user with the default theme
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session: Some(session),
            theme: Theme::default(),
        }
    }

    /// Context without a session
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

/// Result of [`ViewController::mount`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    /// No session; hand control to the login flow
    NeedsLogin,
    /// Catalog loaded with this many listings
    Loaded(usize),
    /// Fetch failed; an error notification was queued
    Failed(ServiceError),
}

/// Result of a confirmed or declined delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(CarId),
    Cancelled,
}

/// Synchronous yes/no question asked before a delete
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
