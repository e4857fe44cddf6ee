//! Logging configuration and initialization.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: standard tracing filter (e.g. `info`, `bank_accounts=debug`)
//! - `LOG_FORMAT`: output format, `pretty` (default), `compact` or `json`
//! - `LOG_TARGET`: `1`/`true` to include the module path in each line
//!
//! Logs always go to stderr so that reports on stdout stay clean.

use std::env;

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line format (default)
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
    /// JSON lines for log aggregation
    Json,
}

impl LogFormat {
    /// Parse format from string, unknown values fall back to `Pretty`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is not set
    pub default_level: String,
    pub include_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Pretty,
            default_level: "info".to_string(),
            include_target: false,
        }
    }
}

impl LogConfig {
    /// Build configuration from `LOG_FORMAT` and `LOG_TARGET`
    pub fn from_env() -> Self {
        let mut config = LogConfig::default();
        if let Ok(format) = env::var("LOG_FORMAT") {
            config.format = LogFormat::parse(&format);
        }
        if let Ok(target) = env::var("LOG_TARGET") {
            config.include_target = matches!(target.trim(), "1" | "true" | "yes");
        }
        config
    }

    /// Builder pattern: override the default filter
    pub fn with_default_level(mut self, level: impl Into<String>) -> Self {
        self.default_level = level.into();
        self
    }
}

/// Install the global tracing subscriber
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_level))?;
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(config.include_target)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(config.include_target)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(config.include_target)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}
