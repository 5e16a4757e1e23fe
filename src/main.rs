//! autodealer CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Sign in and browse the catalog (default command)
//! autodealer
//!
//! # Filter and sort from the command line
//! autodealer list --brand bmw --max-price 3000000 --sort price-asc
//! autodealer list --status available --format json
//!
//! # Manage listings as an admin
//! autodealer add --brand Kia --model Rio --price 1200000
//! autodealer edit 4 --status sold
//! autodealer delete 4
//!
//! # Serve the local catalog to other machines
//! autodealer serve --listen 0.0.0.0:3000
//! autodealer --backend http --api-url http://dealer:3000 list
//! ```
//!
//! # Configuration
//!
//! On first interactive run, autodealer asks where the catalog lives.
//! Configuration is stored in the user's config directory
//! (`~/.config/autodealer/config.toml` on Linux). Set `AUTODEALER_LOG` to
//! control log output, e.g. `AUTODEALER_LOG=autodealer=debug`.

use autodealer::{
    DealerError,
    catalog::CarId,
    cli::{Cli, Commands},
    commands,
    config::DealerConfig,
    search::FilterCriteria,
    ui::{DialoguerInput, OutputWriter, StdoutWriter},
};
use std::io::IsTerminal;
use std::process::ExitCode;

type Result<T> = std::result::Result<T, DealerError>;

fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("AUTODEALER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Logs go to stderr so they never mix with results or the screen
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Dispatch a parsed command
///
/// # Errors
///
/// Returns `DealerError` from configuration loading or the command itself.
fn run(cli: &Cli) -> Result<()> {
    let interactive = std::io::stdin().is_terminal();
    let mut config = DealerConfig::load_or_setup(interactive)?;
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(api_url) = &cli.api_url {
        config.api_url.clone_from(api_url);
    }

    let writer = StdoutWriter::new(cli.quiet || config.quiet);
    let output: &dyn OutputWriter = &writer;
    let input = DialoguerInput::new();
    let command = cli.get_command();

    match command {
        Commands::Config { command } => {
            let path = DealerConfig::config_path()?;
            commands::config::execute(&mut config, &path, &command, output)
        }
        Commands::Seed { yes } => commands::seed::execute(&config, yes, &input, output),
        Commands::Serve { listen } => {
            commands::serve::execute(&config, listen.as_deref(), output)
        }
        Commands::Login { username, password } => {
            let sessions = commands::open_sessions(&config)?;
            commands::auth::login(&sessions, username, password, &input, output).map(|_| ())
        }
        Commands::Logout => commands::auth::logout(&commands::open_sessions(&config)?, output),
        Commands::Whoami => commands::auth::whoami(&commands::open_sessions(&config)?, output),
        Commands::Theme { choice } => {
            commands::theme::execute(&commands::open_sessions(&config)?, choice, output)
        }
        Commands::Browse => {
            let sessions = commands::open_sessions(&config)?;
            let service = commands::open_service(&config)?;
            commands::browse::execute(service, &sessions, &config, &input, output)
        }
        Commands::List {
            brand,
            max_price,
            status,
            sort,
            format,
        } => {
            let criteria = FilterCriteria {
                brand: brand.unwrap_or_default(),
                max_price,
                status,
            };
            let sessions = commands::open_sessions(&config)?;
            let mut view =
                commands::signed_in_view(commands::open_service(&config)?, &sessions, &config)?;
            commands::catalog::list(&mut view, criteria, sort, format, output)
        }
        Commands::Add { fields } => {
            let sessions = commands::open_sessions(&config)?;
            let mut view =
                commands::signed_in_view(commands::open_service(&config)?, &sessions, &config)?;
            commands::catalog::add(&mut view, &fields.into_draft(), output)
        }
        Commands::Edit { id, fields } => {
            let sessions = commands::open_sessions(&config)?;
            let mut view =
                commands::signed_in_view(commands::open_service(&config)?, &sessions, &config)?;
            commands::catalog::edit(&mut view, CarId(id), &fields.into_draft(), output)
        }
        Commands::Delete { id, yes } => {
            let sessions = commands::open_sessions(&config)?;
            let mut view =
                commands::signed_in_view(commands::open_service(&config)?, &sessions, &config)?;
            commands::catalog::delete(&mut view, CarId(id), yes, &input, output)
        }
        Commands::Buy { id } => {
            let sessions = commands::open_sessions(&config)?;
            let mut view =
                commands::signed_in_view(commands::open_service(&config)?, &sessions, &config)?;
            commands::catalog::buy(&mut view, CarId(id), output)
        }
    }
}

/// Main entry point for the autodealer application
///
/// Parses command-line arguments, sets up logging and dispatches to the
/// appropriate command handler. Errors are printed and turn into a failing
/// exit code.
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.quiet, cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            StdoutWriter::default().error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
