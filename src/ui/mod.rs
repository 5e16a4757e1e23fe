//! User interface layer
//!
//! - [`output`]: coloured status lines for CLI commands
//! - [`input`]: prompts for credentials and confirmations
//! - [`tui`]: the interactive catalog screen
//!
//! Commands talk to the traits in this module so tests can swap in
//! [`output::MemoryWriter`] and scripted input.

mod error;

pub mod input;
pub mod output;
pub mod tui;

#[cfg(test)]
pub mod mock;

pub use error::{Result, UiError};
pub use input::{DialoguerInput, InputError, UserInput};
pub use output::{MessageLevel, OutputWriter, StdoutWriter};
