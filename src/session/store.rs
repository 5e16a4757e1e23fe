//! Persistent session and preference store
//!
//! A small sled database, separate from the catalog, with two trees:
//!
//! - `tokens`: token -> encoded grant (session + issue time)
//! - `prefs`: preference name -> value (`current` token, `theme`)

use super::error::{AuthError, Result};
use super::types::{Account, Session, Theme, Token};
use super::Authenticator;
use bincode::{Decode, Encode};
use chrono::Utc;
use sled::{Db, Tree};
use std::path::Path;
use tracing::debug;

const CURRENT_KEY: &[u8] = b"current";
const THEME_KEY: &[u8] = b"theme";

#[derive(Encode, Decode)]
struct Grant {
    session: Session,
    issued_at: i64,
}

/// Token issuer backed by the configured accounts
pub struct SessionStore {
    db: Db,
    tokens: Tree,
    prefs: Tree,
    accounts: Vec<Account>,
}

impl SessionStore {
    /// Open or create the store at `path`
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SledError` if the database cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P, accounts: Vec<Account>) -> Result<Self> {
        let db = sled::open(path)?;
        let tokens = db.open_tree("tokens")?;
        let prefs = db.open_tree("prefs")?;
        Ok(Self {
            db,
            tokens,
            prefs,
            accounts,
        })
    }

    /// Session of the remembered token, if it is still valid
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the store cannot be read.
    pub fn current(&self) -> Result<Option<Session>> {
        match self.current_token()? {
            Some(token) => self.validate(&token),
            None => Ok(None),
        }
    }

    /// Log in and remember the new token as current
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown account.
    pub fn sign_in(&self, username: &str, password: &str) -> Result<Session> {
        if let Some(old) = self.current_token()? {
            self.revoke(&old)?;
        }
        let (token, session) = self.login(username, password)?;
        self.prefs.insert(CURRENT_KEY, token.as_str().as_bytes())?;
        self.db.flush()?;
        Ok(session)
    }

    /// Forget the current session
    ///
    /// Returns `false` if nobody was signed in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the store cannot be written.
    pub fn sign_out(&self) -> Result<bool> {
        let Some(token) = self.current_token()? else {
            return Ok(false);
        };
        self.revoke(&token)?;
        self.prefs.remove(CURRENT_KEY)?;
        self.db.flush()?;
        Ok(true)
    }

    /// Saved theme, light if none was saved
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the store cannot be read.
    pub fn theme(&self) -> Result<Theme> {
        match self.prefs.get(THEME_KEY)? {
            Some(bytes) => String::from_utf8_lossy(&bytes).parse(),
            None => Ok(Theme::default()),
        }
    }

    /// Persist the theme preference
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the store cannot be written.
    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.prefs.insert(THEME_KEY, theme.as_str().as_bytes())?;
        self.db.flush()?;
        Ok(())
    }

    fn current_token(&self) -> Result<Option<Token>> {
        Ok(self
            .prefs
            .get(CURRENT_KEY)?
            .map(|bytes| Token::new(String::from_utf8_lossy(&bytes))))
    }

    fn issue_token(&self) -> Result<Token> {
        let counter = self.db.generate_id()?;
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        Ok(Token::new(format!("{counter:016x}{nanos:016x}")))
    }
}

impl Authenticator for SessionStore {
    fn login(&self, username: &str, password: &str) -> Result<(Token, Session)> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.username == username && a.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        let session = Session::new(&account.username, account.role);
        let token = self.issue_token()?;
        let grant = Grant {
            session: session.clone(),
            issued_at: Utc::now().timestamp(),
        };
        let value = bincode::encode_to_vec(&grant, bincode::config::standard())?;
        self.tokens.insert(token.as_str().as_bytes(), value)?;
        debug!(username, role = %session.role, "issued session token");
        Ok((token, session))
    }

    fn validate(&self, token: &Token) -> Result<Option<Session>> {
        let Some(bytes) = self.tokens.get(token.as_str().as_bytes())? else {
            return Ok(None);
        };
        let (grant, _): (Grant, usize) =
            bincode::decode_from_slice(&bytes, bincode::config::standard())?;

        // The account may have been removed or changed role since issue
        let still_valid = self
            .accounts
            .iter()
            .any(|a| a.username == grant.session.username && a.role == grant.session.role);
        if still_valid {
            Ok(Some(grant.session))
        } else {
            debug!(issued_at = grant.issued_at, "rejecting stale session token");
            Ok(None)
        }
    }

    fn revoke(&self, token: &Token) -> Result<()> {
        self.tokens.remove(token.as_str().as_bytes())?;
        Ok(())
    }
}

impl Drop for SessionStore {
    fn drop(&mut self) {
        let _ = self.db.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;

    fn open_temp(accounts: Vec<Account>) -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session"), accounts).unwrap();
        (dir, store)
    }

    #[test]
    fn test_login_with_default_accounts() {
        let (_dir, store) = open_temp(Account::defaults());

        let (_, admin) = store.login("admin", "admin123").unwrap();
        assert_eq!(admin.role, Role::Admin);

        let (_, buyer) = store.login("buyer", "buyer123").unwrap();
        assert_eq!(buyer.role, Role::Customer);
        assert_eq!(buyer.display_name, "buyer");

        assert!(matches!(
            store.login("admin", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_tokens_are_unique_and_revocable() {
        let (_dir, store) = open_temp(Account::defaults());
        let (a, _) = store.login("admin", "admin123").unwrap();
        let (b, _) = store.login("admin", "admin123").unwrap();
        assert_ne!(a, b);

        store.revoke(&a).unwrap();
        assert!(store.validate(&a).unwrap().is_none());
        assert!(store.validate(&b).unwrap().is_some());
        assert!(store.validate(&Token::new("forged")).unwrap().is_none());
    }

    #[test]
    fn test_sign_in_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");

        {
            let store = SessionStore::open(&path, Account::defaults()).unwrap();
            assert!(store.current().unwrap().is_none());
            store.sign_in("buyer", "buyer123").unwrap();
        }

        let store = SessionStore::open(&path, Account::defaults()).unwrap();
        let session = store.current().unwrap().unwrap();
        assert_eq!(session.username, "buyer");

        assert!(store.sign_out().unwrap());
        assert!(store.current().unwrap().is_none());
        assert!(!store.sign_out().unwrap());
    }

    #[test]
    fn test_removed_account_invalidates_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");

        {
            let store = SessionStore::open(&path, Account::defaults()).unwrap();
            store.sign_in("admin", "admin123").unwrap();
        }

        let only_buyer = vec![Account::new("buyer", "buyer123", Role::Customer)];
        let store = SessionStore::open(&path, only_buyer).unwrap();
        assert!(store.current().unwrap().is_none());
    }

    #[test]
    fn test_theme_preference() {
        let (_dir, store) = open_temp(Account::defaults());
        assert_eq!(store.theme().unwrap(), Theme::Light);

        store.set_theme(Theme::Dark).unwrap();
        assert_eq!(store.theme().unwrap(), Theme::Dark);
    }
}
