//! Catalog model errors

use thiserror::Error;

/// Errors raised while parsing or validating catalog records
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    /// Status string is not one of `available`, `sold`, `reserved`
    #[error("Unknown status '{0}' (expected available, sold or reserved)")]
    InvalidStatus(String),

    /// A field value violates a record invariant
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// Type alias for cleaner function signatures
pub type Result<T> = std::result::Result<T, CatalogError>;
