//! Interactive setup wizard for first-time configuration
//!
//! Asks where the catalog lives when autodealer is run for the first time.

use super::{Backend, DealerConfig};
use config::ConfigError;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use std::path::Path;

/// Interactive first-time setup
///
/// 1. Prompts for the backend (local database or remote API)
/// 2. Prompts for the API URL when the remote backend is chosen
/// 3. Saves the configuration to `path`
///
/// # Errors
///
/// Returns `ConfigError` if user input cannot be read or the configuration
/// cannot be saved.
pub fn first_time_setup(path: &Path) -> Result<DealerConfig, ConfigError> {
    println!("Welcome to autodealer! Let's set up your catalog.\n");

    let theme = ColorfulTheme::default();
    let choice = Select::with_theme(&theme)
        .with_prompt("Catalog backend")
        .items(&["local database", "remote API"])
        .default(0)
        .interact()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let mut config = DealerConfig::default();
    if choice == 1 {
        config.backend = Backend::Http;
        config.api_url = Input::with_theme(&theme)
            .with_prompt("API URL")
            .default(config.api_url.clone())
            .interact_text()
            .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;
    }

    config.save_to(path)?;

    println!("\nConfiguration saved to {}", path.display());
    Ok(config)
}
