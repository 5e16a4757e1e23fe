//! Sign-in commands - login, logout and whoami

use super::Result;
use crate::session::{Session, SessionStore};
use crate::ui::{InputError, OutputWriter, UserInput};

/// Sign in, prompting for any credential not given
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` for an unknown account, or an
/// input error if a prompt is cancelled.
pub fn login(
    sessions: &SessionStore,
    username: Option<String>,
    password: Option<String>,
    input: &dyn UserInput,
    output: &dyn OutputWriter,
) -> Result<Session> {
    let username = match username {
        Some(username) => username,
        None => input
            .prompt_text("Username", None)?
            .ok_or(InputError::Cancelled)?,
    };
    let password = match password {
        Some(password) => password,
        None => input
            .prompt_password("Password")?
            .ok_or(InputError::Cancelled)?,
    };

    let session = sessions.sign_in(username.trim(), &password)?;
    output.success(&format!(
        "Signed in as {} ({})",
        session.display_name, session.role
    ));
    Ok(session)
}

/// Execute the logout command
pub fn logout(sessions: &SessionStore, output: &dyn OutputWriter) -> Result<()> {
    if sessions.sign_out()? {
        output.success("Signed out");
    } else {
        output.info("Not signed in");
    }
    Ok(())
}

/// Execute the whoami command
pub fn whoami(sessions: &SessionStore, output: &dyn OutputWriter) -> Result<()> {
    match sessions.current()? {
        Some(session) => output.write(&format!("{} ({})", session.username, session.role)),
        None => output.info("Not signed in"),
    }
    Ok(())
}
