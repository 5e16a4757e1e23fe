//! Browse command - the interactive catalog screen

use super::{Result, auth, view_for};
use crate::config::DealerConfig;
use crate::service::CatalogService;
use crate::session::SessionStore;
use crate::ui::{OutputWriter, UserInput, tui};
use crate::view::MountOutcome;
use tracing::debug;

/// Execute the browse command
///
/// Prompts for credentials when nobody is signed in. A failed load still
/// opens the screen, where the catalog can be reloaded. Logging out from
/// the screen ends the command.
pub fn execute<S: CatalogService>(
    service: S,
    sessions: &SessionStore,
    config: &DealerConfig,
    input: &dyn UserInput,
    output: &dyn OutputWriter,
) -> Result<()> {
    let session = match sessions.current()? {
        Some(session) => session,
        None => auth::login(sessions, None, None, input, output)?,
    };

    let mut view = view_for(service, session, sessions, config)?;
    match view.mount() {
        MountOutcome::Loaded(count) => debug!(count, "catalog loaded"),
        MountOutcome::Failed(e) => debug!(error = %e, "opening screen without catalog"),
        MountOutcome::NeedsLogin => {}
    }

    tui::run(&mut view, Some(sessions))?;
    if view.session().is_none() {
        output.success("Signed out");
    }
    Ok(())
}
