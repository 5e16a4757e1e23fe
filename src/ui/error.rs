//! UI error types

use thiserror::Error;

/// Errors that can occur in UI operations
#[derive(Debug, Error)]
pub enum UiError {
    /// Terminal could not be set up, drawn or read
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A prompt failed or was cancelled
    #[error(transparent)]
    Input(#[from] super::input::InputError),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
