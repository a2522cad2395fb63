//! Tracing setup
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a fmt
//! layer on stderr. When a log directory is configured, a daily rolling file
//! layer is added; keep the returned guard alive for the lifetime of the
//! program or buffered lines are lost.

use crate::config::{LoggingConfig, LOG_FILE_PREFIX};
use crate::error::{HarnessError, Result, ResultExt};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter: `RUST_LOG` wins, then the configured filter
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Initialize global logging
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let registry = tracing_subscriber::registry()
        .with(build_filter(config))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let guard = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .map_err(HarnessError::from)
                .with_context(|| format!("Failed to create log directory {:?}", dir))?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .try_init()
                .map_err(|e| HarnessError::Config(e.to_string()))
                .context("Failed to install logger")?;
            Some(guard)
        }
        None => {
            registry
                .try_init()
                .map_err(|e| HarnessError::Config(e.to_string()))
                .context("Failed to install logger")?;
            None
        }
    };

    tracing::debug!("Logging initialized with filter {:?}", config.filter);
    Ok(guard)
}
