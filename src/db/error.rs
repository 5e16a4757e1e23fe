//! Database-specific error types
//!
//! This module defines all error types that can occur during database operations.
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`**: Failures when deserializing a stored listing
//! - **`EncodeError`**: Failures when serializing a listing
//! - **`NotFound`**: The requested listing identifier is not stored
//! - **`InvalidInput`**: A draft violated a record invariant

use crate::catalog::{CarId, CatalogError};
use thiserror::Error;

/// Database-specific errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// No listing with this identifier
    #[error("Car {0} not found")]
    NotFound(CarId),

    /// Invalid input provided (e.g., negative price)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<CatalogError> for DbError {
    fn from(err: CatalogError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DbError::NotFound(CarId(42));
        assert_eq!(err.to_string(), "Car 42 not found");
    }

    #[test]
    fn test_catalog_error_becomes_invalid_input() {
        let err: DbError = CatalogError::InvalidStatus("leased".into()).into();
        assert!(matches!(err, DbError::InvalidInput(msg) if msg.contains("leased")));
    }

    #[test]
    fn test_sled_error_conversion() {
        let sled_err = sled::Error::Unsupported("test".into());
        let err: DbError = sled_err.into();
        assert!(err.to_string().starts_with("Database error"));
    }
}
