//! Caisson - resolve validated service configuration and manage deployment profiles.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use caisson::cli::output;
use caisson::cli::{execute, Cli};
use caisson::core::constants;
use caisson::core::secret::SecretDocument;
use caisson::error::{Error, ProfileError, ReferenceError, ResolveError};

fn main() {
    let cli = Cli::parse();

    // CAISSON_LOG wins over --verbose when both are given
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("caisson=debug")
        } else {
            EnvFilter::new("caisson=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command) {
        // Pair the error with a remediation where one exists
        let suggestion = match &e {
            Error::Profile(ProfileError::NotFound(name)) => {
                Some(format!("run: caisson profile create {name}"))
            }
            Error::Profile(ProfileError::AlreadyExists(name)) => {
                Some(format!("run: caisson profile show {name}"))
            }
            Error::Resolve(ResolveError::MissingFields { .. })
            | Error::Resolve(ResolveError::InvalidDocument { .. }) => Some(format!(
                "expected secret document shape:\n{}",
                SecretDocument::example()
            )),
            Error::Reference(ReferenceError::Malformed { .. }) => Some(
                "references may be a full ARN, @path-to-a-file, or a bare name".to_string(),
            ),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
