//! Catalog service error types

use crate::catalog::{CarId, CatalogError};
use crate::db::DbError;
use thiserror::Error;

/// Failures of a catalog service call
///
/// The view treats every variant the same way (an error notification), but
/// the CLI and the API server distinguish them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a failure status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// No listing has this identifier
    #[error("Car {0} not found")]
    NotFound(CarId),

    /// The request was rejected as malformed
    #[error("Invalid request: {0}")]
    Invalid(String),
}

impl ServiceError {
    /// HTTP status that best describes this failure
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Network(_) => 502,
            Self::Server { status, .. } => *status,
            Self::NotFound(_) => 404,
            Self::Invalid(_) => 400,
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(id) => Self::NotFound(id),
            DbError::InvalidInput(msg) => Self::Invalid(msg),
            other => Self::Server {
                status: 500,
                message: other.to_string(),
            },
        }
    }
}

impl From<CatalogError> for ServiceError {
    fn from(err: CatalogError) -> Self {
        Self::Invalid(err.to_string())
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Server {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => Self::Network(err.to_string()),
        }
    }
}

/// Result type for catalog service calls
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_not_found_maps_to_not_found() {
        let err: ServiceError = DbError::NotFound(CarId(4)).into();
        assert_eq!(err, ServiceError::NotFound(CarId(4)));
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_db_storage_failure_maps_to_server() {
        let err: ServiceError = DbError::SledError(sled::Error::Unsupported("x".into())).into();
        assert!(matches!(err, ServiceError::Server { status: 500, .. }));
    }

    #[test]
    fn test_catalog_error_maps_to_invalid() {
        let err: ServiceError = CatalogError::InvalidStatus("gone".into()).into();
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_display() {
        let err = ServiceError::Server {
            status: 503,
            message: "maintenance".into(),
        };
        assert_eq!(err.to_string(), "Server error (503): maintenance");
    }
}
