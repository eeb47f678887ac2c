//! Tracing subscriber setup for the binary.
//!
//! Logs go to stderr so stdout carries only JSON replies.

use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::AppError;

pub const ENV_LOG_FORMAT: &str = "REPLYDESK_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

/// Output format of the log layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// `json` selects JSON lines; anything else the human-readable format
    pub fn from_env() -> Self {
        match env::var(ENV_LOG_FORMAT) {
            Ok(value) if value.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Install the global subscriber. Filter comes from `RUST_LOG`, default `info`.
pub fn init_tracing(format: LogFormat) -> Result<(), AppError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::Internal(format!("failed to install tracing subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_env() {
        temp_env::with_var(ENV_LOG_FORMAT, Some("JSON"), || {
            assert_eq!(LogFormat::from_env(), LogFormat::Json);
        });
        temp_env::with_var(ENV_LOG_FORMAT, Some("plain"), || {
            assert_eq!(LogFormat::from_env(), LogFormat::Pretty);
        });
        temp_env::with_var_unset(ENV_LOG_FORMAT, || {
            assert_eq!(LogFormat::from_env(), LogFormat::Pretty);
        });
    }
}
