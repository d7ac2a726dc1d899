//! bwenv - Bitwarden secret references for .env files.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bwenv::cli::output;
use bwenv::cli::{execute, Cli};
use bwenv::core::constants::LOG_ENV;
use bwenv::error::{ConfigError, Error, VaultError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("bwenv=debug")
        } else {
            EnvFilter::new("bwenv=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.session) {
        let suggestion = match &e {
            Error::Config(ConfigError::MissingSession) => Some(format!(
                "run {} and pass the token with --session or BW_SESSION",
                output::cmd("bw unlock")
            )),
            Error::Config(ConfigError::VaultLocked { .. }) => Some(format!(
                "run {} to generate a new session token",
                output::cmd("bw unlock")
            )),
            Error::Vault(VaultError::NoFields { id }) => Some(format!(
                "run {} to view the Bitwarden CLI response",
                output::cmd(&format!("bw get item {}", id))
            )),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
