//! View controller error types

use crate::service::ServiceError;
use crate::session::Role;
use thiserror::Error;

/// Reasons a view operation did not happen
///
/// Every variant except `RoleRequired`, `NotAuthenticated` and `NotLoaded`
/// has also been reported through the notification queue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The session's role may not perform this action
    #[error("This action requires the {0} role")]
    RoleRequired(Role),

    /// No session is present
    #[error("Not signed in")]
    NotAuthenticated,

    /// The catalog has not been loaded successfully
    #[error("Catalog is not loaded")]
    NotLoaded,

    /// The draft was rejected before reaching the service
    #[error("Invalid listing: {0}")]
    Invalid(String),

    /// The catalog service call failed
    #[error(transparent)]
    Service(#[from] ServiceError),
}

pub type Result<T> = std::result::Result<T, ViewError>;
