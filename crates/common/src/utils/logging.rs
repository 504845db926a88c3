use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Output shape of the tracing subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    /// Parse a config/env value; anything other than `json` means compact.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize the tracing subscriber in the requested format, writing to stdout.
/// - Respects `RUST_LOG` if set, otherwise uses `fallback_filter`
/// - A second call is a no-op
pub fn init_logging(format: LogFormat, fallback_filter: &str) {
    let filter = env_filter(fallback_filter);
    let _ = match format {
        LogFormat::Compact => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .with_writer(io::stdout)
            .try_init(),
        LogFormat::Json => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_writer(io::stdout)
            .try_init(),
    };
}
