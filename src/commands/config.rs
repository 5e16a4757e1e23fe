//! Config command - read and write single settings

use super::Result;
use crate::DealerError;
use crate::cli::{ConfigCommands, parse_setting};
use crate::config::DealerConfig;
use crate::ui::OutputWriter;
use std::path::Path;

/// Execute a config subcommand against the file at `path`
pub fn execute(
    config: &mut DealerConfig,
    path: &Path,
    command: &ConfigCommands,
    output: &dyn OutputWriter,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = parse_setting(setting).map_err(DealerError::InvalidInput)?;
            config.set(key, value)?;
            config.save_to(path)?;
            output.success(&format!("Set {key} = {}", config.get(key)?));
        }
        ConfigCommands::Get { key } => {
            output.write(&config.get(key)?);
        }
    }
    Ok(())
}
