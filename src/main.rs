//! Stowaway - end-to-end encrypted team secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stowaway::cli::output;
use stowaway::cli::{execute, Cli};
use stowaway::error::{ConfigError, Error, KeyError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("STOWAWAY_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("stowaway=debug")
        } else {
            EnvFilter::new("stowaway=warn")
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

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::Config(ConfigError::NotInitialized) => Some("run: stowaway init"),
            Error::Key(KeyError::NoIdentity(_)) => Some("run: stowaway init"),
            Error::Config(ConfigError::StoreExists(_)) => {
                Some("remove the stale store, then run: stowaway init")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
