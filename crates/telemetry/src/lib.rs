//! Structured logging setup.

use tracing_subscriber::{fmt, EnvFilter};

/// Logging options, normally filled from the application config.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Fallback filter when `RUST_LOG` is unset (e.g. "info", "api=debug")
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured filter when both are set.
pub fn init(settings: &LogSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.json {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        fmt().with_env_filter(filter).with_target(true).init();
    }

    tracing::info!(filter = %settings.filter, json = settings.json, "Logging initialized");
}
