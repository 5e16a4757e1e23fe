//! User input abstraction layer
//!
//! Commands ask for credentials and confirmations through [`UserInput`] so
//! they can be driven by scripted answers in tests.

use std::io;

/// Trait for user input operations
///
/// # Examples
///
/// ```no_run
/// use autodealer::ui::input::{DialoguerInput, UserInput};
///
/// let input = DialoguerInput::new();
///
/// if let Some(true) = input.prompt_confirm("Delete Toyota Camry?", false).unwrap() {
///     println!("Deleting...");
/// }
/// ```
pub trait UserInput: Send + Sync {
    /// Prompt user for text input
    ///
    /// # Returns
    ///
    /// * `Ok(Some(String))` - User entered text
    /// * `Ok(None)` - User cancelled
    /// * `Err(_)` - Input operation failed
    fn prompt_text(&self, prompt: &str, default: Option<&str>) -> Result<Option<String>>;

    /// Prompt for a secret without echoing it
    fn prompt_password(&self, prompt: &str) -> Result<Option<String>>;

    /// Prompt user for confirmation (yes/no)
    ///
    /// # Returns
    ///
    /// * `Ok(Some(bool))` - User confirmed (true) or denied (false)
    /// * `Ok(None)` - User cancelled
    /// * `Err(_)` - Input operation failed
    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>>;

    /// Yes/no question where cancelling or failing counts as no
    fn confirmed(&self, prompt: &str) -> bool {
        matches!(self.prompt_confirm(prompt, false), Ok(Some(true)))
    }
}

/// Result type for user input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Errors that can occur during user input
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// IO error during input
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Input cancelled by user
    #[error("Input cancelled by user")]
    Cancelled,
}

/// CLI-based user input using dialoguer
pub struct DialoguerInput {
    theme: dialoguer::theme::ColorfulTheme,
}

impl DialoguerInput {
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: dialoguer::theme::ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerInput {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInput for DialoguerInput {
    fn prompt_text(&self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        use dialoguer::Input;

        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);

        if let Some(def) = default {
            input = input.default(def.to_string());
        }

        input
            .interact_text()
            .map(Some)
            .map_err(|e| InputError::Io(io::Error::other(e)))
    }

    fn prompt_password(&self, prompt: &str) -> Result<Option<String>> {
        use dialoguer::Password;

        Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact()
            .map(Some)
            .map_err(|e| InputError::Io(io::Error::other(e)))
    }

    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>> {
        use dialoguer::Confirm;

        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()
            .map_err(|e| InputError::Io(io::Error::other(e)))
    }
}
