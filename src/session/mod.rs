//! Sign-in sessions and user preferences
//!
//! A session is an opaque [`Token`] issued by an [`Authenticator`] and
//! re-validated on every start; the role is never read back from storage
//! without that check.

pub mod error;
pub mod store;
pub mod types;

pub use error::{AuthError, Result};
pub use store::SessionStore;
pub use types::{Account, Role, Session, Theme, Token};

/// Issues and checks session tokens
pub trait Authenticator {
    /// Check credentials and issue a fresh token
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no account matches.
    fn login(&self, username: &str, password: &str) -> Result<(Token, Session)>;

    /// Resolve a token to its session, or `None` if it is unknown or stale
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the token store cannot be read.
    fn validate(&self, token: &Token) -> Result<Option<Session>>;

    /// Invalidate a token; revoking an unknown token is a no-op
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the token store cannot be written.
    fn revoke(&self, token: &Token) -> Result<()>;
}
