//! Authentication and session store errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    #[error("Failed to decode session data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    #[error("Failed to encode session data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),
}

pub type Result<T> = std::result::Result<T, AuthError>;
