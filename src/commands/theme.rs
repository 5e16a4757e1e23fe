//! Theme command - show or change the colour theme

use super::Result;
use crate::cli::ThemeChoice;
use crate::session::{SessionStore, Theme};
use crate::ui::OutputWriter;

/// Execute the theme command
///
/// Without a choice the saved theme is printed.
pub fn execute(
    sessions: &SessionStore,
    choice: Option<ThemeChoice>,
    output: &dyn OutputWriter,
) -> Result<()> {
    let current = sessions.theme()?;
    let theme = match choice {
        None => {
            output.write(current.as_str());
            return Ok(());
        }
        Some(ThemeChoice::Light) => Theme::Light,
        Some(ThemeChoice::Dark) => Theme::Dark,
        Some(ThemeChoice::Toggle) => current.toggle(),
    };

    sessions.set_theme(theme)?;
    output.success(&format!("Theme set to {}", theme.as_str()));
    Ok(())
}
