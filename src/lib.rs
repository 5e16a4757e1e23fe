//! autodealer - a car dealership catalog
//!
//! The catalog is browsed through a [`view::ViewController`] that keeps a
//! client-side copy of the listings, filters and sorts it locally and
//! reports every outcome through a [`notify::NotificationQueue`].
//! Listings live behind the [`service::CatalogService`] contract: an
//! embedded sled database, or a remote instance of the JSON API served by
//! [`server::ApiServer`].

use thiserror::Error;

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod notify;
pub mod output;
pub mod search;
pub mod server;
pub mod service;
pub mod session;
pub mod ui;
pub mod view;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum DealerError {
    /// Database error
    #[error("Database error: {0}")]
    DbError(#[from] db::DbError),
    /// Catalog service call failed
    #[error("Catalog service error: {0}")]
    ServiceError(#[from] service::ServiceError),
    /// The view refused or failed an operation
    #[error("{0}")]
    ViewError(#[from] view::ViewError),
    /// Sign-in or session storage error
    #[error("Session error: {0}")]
    AuthError(#[from] session::AuthError),
    /// API server error
    #[error("Server error: {0}")]
    ServerError(#[from] server::ServerError),
    /// Terminal UI or prompt error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Invalid listing data
    #[error("Invalid listing: {0}")]
    CatalogError(#[from] catalog::CatalogError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ui::InputError> for DealerError {
    fn from(err: ui::InputError) -> Self {
        Self::UiError(err.into())
    }
}
