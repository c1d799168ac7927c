//! Trustpilot OAuth command-line client
//!
//! Runs a single OAuth operation per invocation:
//! 1. Parses the command and `--config` flag
//! 2. Loads configuration (TOML + secrets from the environment)
//! 3. Performs one request through `trustpilot_auth::Authenticator`
//! 4. Prints the result as JSON on stdout; logs go to stderr

mod cli;
mod commands;
mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trustpilot_auth::{Authenticator, ReqwestTransport};

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // JSON logs on stderr with LOG_LEVEL / RUST_LOG support; stdout is the result
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = cli::parse(std::env::args().skip(1))?;

    let config_path = Config::resolve_path(cli.config_path.as_deref());
    info!(path = %config_path.display(), "loading configuration");

    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    info!(
        token_url = %config.endpoints.token_url,
        timeout_secs = config.http.timeout_secs,
        api_secret = config.credentials.api_secret.is_some(),
        "configuration loaded"
    );

    let transport = ReqwestTransport::with_timeout(Duration::from_secs(config.http.timeout_secs))
        .context("failed to build HTTP client")?;
    let authenticator =
        Authenticator::new(Arc::new(transport)).with_endpoints(config.endpoints.clone());

    let output = commands::run(&authenticator, &config, cli.command)
        .await
        .inspect_err(|e| error!(error = %e, "command failed"))?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
