//! Revfeed CLI entrypoint for the review-comment feed.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use revfeed::{FeedError, RevfeedConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), FeedError> {
    let config = load_config()?;
    revfeed::cli::feed::run(&config).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`FeedError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<RevfeedConfig, FeedError> {
    RevfeedConfig::load().map_err(|error| FeedError::Configuration {
        message: error.to_string(),
    })
}

/// Routes diagnostics to stderr so the feed itself stays on stdout.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}
