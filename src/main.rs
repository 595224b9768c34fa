//! Mystiko - materialize stored secrets into files and environment variables.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mystiko::cli::output;
use mystiko::cli::{execute, Cli};
use mystiko::core::constants::LOG_ENV;
use mystiko::error::{ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("mystiko=debug")
        } else {
            EnvFilter::new("mystiko=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            Error::Config(ConfigError::ReadFile { .. }) => {
                Some("pass --config <PATH> or set MYSTIKO_CONFIG")
            }
            Error::Store(store) if store.kind.is_credentials() => {
                Some("refresh your AWS credentials and retry")
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
