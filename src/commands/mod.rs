//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and runs against the configured catalog and session store. The
//! helpers here open those stores and connect them to a view.

pub mod auth;
pub mod browse;
pub mod catalog;
pub mod config;
pub mod seed;
pub mod serve;
pub mod theme;

use crate::DealerError;
use crate::config::{Backend, DealerConfig};
use crate::notify::NotificationQueue;
use crate::service::{CatalogService, HttpCatalog, LocalCatalog};
use crate::session::{Session, SessionStore};
use crate::ui::OutputWriter;
use crate::view::{MountOutcome, ViewContext, ViewController, ViewError};
use tracing::debug;

type Result<T> = std::result::Result<T, DealerError>;

/// Open the catalog named by the configuration
///
/// # Errors
///
/// Returns `DealerError` if the local database cannot be opened or the
/// HTTP client cannot be built.
pub fn open_service(config: &DealerConfig) -> Result<Box<dyn CatalogService>> {
    match config.backend {
        Backend::Local => {
            let path = config.catalog_path()?;
            debug!(path = %path.display(), "opening local catalog");
            Ok(Box::new(LocalCatalog::open(path)?))
        }
        Backend::Http => {
            debug!(url = %config.api_url, "using remote catalog");
            Ok(Box::new(HttpCatalog::new(config.api_url.as_str())?))
        }
    }
}

/// Open the session and preference store
///
/// # Errors
///
/// Returns `DealerError` if the data directory is unknown or the store
/// cannot be opened.
pub fn open_sessions(config: &DealerConfig) -> Result<SessionStore> {
    Ok(SessionStore::open(
        config.session_path()?,
        config.accounts.clone(),
    )?)
}

/// Build a view for `session` with the stored theme and configured TTL
///
/// # Errors
///
/// Returns `DealerError` if the preferences cannot be read.
pub fn view_for<S: CatalogService>(
    service: S,
    session: Session,
    sessions: &SessionStore,
    config: &DealerConfig,
) -> Result<ViewController<S>> {
    let context = ViewContext::new(session).with_theme(sessions.theme()?);
    Ok(ViewController::new(service, context)
        .with_notifications(NotificationQueue::with_ttl(config.notification_ttl())))
}

/// Build a view for the signed-in user
///
/// # Errors
///
/// Returns `ViewError::NotAuthenticated` when nobody is signed in.
pub fn signed_in_view<S: CatalogService>(
    service: S,
    sessions: &SessionStore,
    config: &DealerConfig,
) -> Result<ViewController<S>> {
    let session = sessions
        .current()?
        .ok_or(DealerError::ViewError(ViewError::NotAuthenticated))?;
    view_for(service, session, sessions, config)
}

/// Load the catalog into the view, printing any notification on failure
///
/// # Errors
///
/// Returns the service error if the catalog cannot be fetched.
pub fn load<S: CatalogService>(
    view: &mut ViewController<S>,
    output: &dyn OutputWriter,
) -> Result<usize> {
    match view.mount() {
        MountOutcome::Loaded(count) => Ok(count),
        MountOutcome::NeedsLogin => Err(ViewError::NotAuthenticated.into()),
        MountOutcome::Failed(e) => {
            report(view, output);
            Err(e.into())
        }
    }
}

/// Print the visible notifications, oldest first
pub fn report<S: CatalogService>(view: &ViewController<S>, output: &dyn OutputWriter) {
    for notification in view.notifications().visible() {
        output.notification(notification);
    }
}
