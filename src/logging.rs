//! Logging setup for the command line tool.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary. Logs go to stderr so stdout stays a clean JSON document.
//!
//! - `warn`: fallbacks and failed requests
//! - `info`: entry point outcomes
//! - `debug`: classification, scale and layout decisions

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Logging configuration derived from command line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
}

impl LogConfig {
    /// Map a `-v` count to a level: none = warn, 1 = info, 2 = debug, 3+ = trace.
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self { level }
    }

    /// `RUST_LOG` wins when set; otherwise the verbosity level applies to
    /// this crate.
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("autochart={}", self.level.as_str().to_lowercase()))
        })
    }
}

/// Install the global stderr subscriber. Errors if one is already set.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
