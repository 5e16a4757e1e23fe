//! Command-line interface definitions and parsing
//!
//! Running `autodealer` with no command opens the interactive catalog
//! screen. Every other command works on the same catalog and session as
//! the screen does.
//!
//! # Examples
//!
//! ```
//! use autodealer::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["autodealer", "list", "--brand", "bmw", "--sort", "price-asc"]);
//! assert!(matches!(cli.get_command(), Commands::List { .. }));
//! ```

use crate::catalog::{CarDraft, CarStatus};
use crate::config::Backend;
use crate::output::OutputFormat;
use crate::search::{FilterCriteria, SortKey};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "autodealer")]
#[command(about = "Browse and manage a car dealership catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log debug output to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Catalog backend for this run (overrides config)
    #[arg(long = "backend", global = true, value_name = "local|http")]
    pub backend: Option<Backend>,

    /// Catalog API URL for this run (overrides config)
    #[arg(long = "api-url", global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the interactive catalog screen (default)
    #[command(visible_alias = "b")]
    Browse,

    /// Print the catalog, optionally filtered and sorted
    #[command(visible_alias = "ls")]
    List {
        /// Case-insensitive brand substring
        #[arg(short = 'b', long = "brand")]
        brand: Option<String>,

        /// Highest price to include
        #[arg(short = 'p', long = "max-price", value_name = "PRICE", value_parser = parse_max_price_arg)]
        max_price: Option<f64>,

        /// Only listings with this status (available, sold, reserved)
        #[arg(short = 's', long = "status")]
        status: Option<CarStatus>,

        /// Sort order (price-asc, price-desc, year-desc, mileage-asc)
        #[arg(short = 'o', long = "sort", default_value = "none")]
        sort: SortKey,

        /// Output format
        #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Add a listing (admin)
    Add {
        #[command(flatten)]
        fields: CarFields,
    },

    /// Change fields of a listing (admin)
    Edit {
        /// Listing identifier
        id: u64,

        #[command(flatten)]
        fields: CarFields,
    },

    /// Delete a listing (admin)
    #[command(visible_alias = "rm")]
    Delete {
        /// Listing identifier
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Ask to buy a listing (customer)
    Buy {
        /// Listing identifier
        id: u64,
    },

    /// Sign in; prompts for anything not given
    Login {
        #[arg(short = 'u', long = "username")]
        username: Option<String>,

        #[arg(short = 'p', long = "password")]
        password: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show or change the colour theme
    Theme {
        #[arg(value_enum)]
        choice: Option<ThemeChoice>,
    },

    /// Replace the local catalog with sample stock
    Seed {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Serve the catalog over HTTP
    Serve {
        /// Address to listen on (overrides config)
        #[arg(short = 'l', long = "listen", value_name = "ADDR")]
        listen: Option<String>,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., backend=http)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., api_url)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

/// Theme argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Light,
    Dark,
    /// Switch to the other theme
    Toggle,
}

/// Listing fields accepted by `add` and `edit`
#[derive(Args, Debug, Clone, Default)]
pub struct CarFields {
    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub price: Option<f64>,

    #[arg(long)]
    pub mileage: Option<u64>,

    #[arg(long)]
    pub color: Option<String>,

    #[arg(long)]
    pub status: Option<CarStatus>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long = "image-url", value_name = "URL")]
    pub image_url: Option<String>,
}

impl CarFields {
    /// Draft carrying exactly the fields given on the command line
    #[must_use]
    pub fn into_draft(self) -> CarDraft {
        CarDraft {
            brand: self.brand,
            model: self.model,
            year: self.year,
            price: self.price,
            mileage: self.mileage,
            color: self.color,
            status: self.status,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse)
    }
}

/// Split a `KEY=VALUE` argument
///
/// # Errors
///
/// Returns a message if there is no `=` or the key is empty.
pub fn parse_setting(setting: &str) -> Result<(&str, &str), String> {
    match setting.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(format!(
            "Invalid setting '{setting}'. Use KEY=VALUE (e.g., backend=http)"
        )),
    }
}

/// Parse `--max-price`, rejecting negative and non-finite bounds
///
/// # Errors
///
/// Returns a message unless the value is a non-negative number.
pub fn parse_max_price_arg(value: &str) -> Result<f64, String> {
    match FilterCriteria::parse_max_price(value) {
        Ok(Some(price)) => Ok(price),
        Ok(None) => Err("Expected a price".to_string()),
        Err(e) => Err(e.to_string()),
    }
}
