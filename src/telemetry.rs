//! Structured logging setup.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::Config;
use crate::error::Error;

/// Installs the global subscriber. `RUST_LOG` wins over `config.log_level`.
pub fn init(config: &Config) -> Result<(), Error> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| Error::Config(format!("log level `{}`: {e}", config.log_level)))?,
    };

    let installed = if config.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init()
    };
    installed.map_err(|e| Error::Config(e.to_string()))?;

    tracing::info!(
        level = %config.log_level,
        json = config.json_logs,
        "logging initialized"
    );
    Ok(())
}
