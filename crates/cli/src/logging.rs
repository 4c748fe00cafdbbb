//! Logging setup
//!
//! Logs go to stderr so that stdout carries only command output.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "ironmq=info";
const LOG_FORMAT_VAR: &str = "IRONMQ_LOG_FORMAT";

/// Install the global subscriber
///
/// `RUST_LOG` overrides the default filter; `IRONMQ_LOG_FORMAT=json` switches
/// to structured output.
pub fn init() -> Result<()> {
    let log_format = std::env::var(LOG_FORMAT_VAR).unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Failed to create env filter")?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        _ => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
    }
    .context("Failed to install tracing subscriber")
}
