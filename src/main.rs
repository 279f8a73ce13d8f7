//! Rule Management API
//!
//! Multi-tenant IP rule management service handling:
//! - Rule CRUD with per-tenant isolation and validation
//! - Sliding-window rate limiting and tenant permission checks
//! - Audit logging for every mutating request
//! - Background cleanup of expired rules and old audit logs

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

use api::{router, ApiSettings, AppState};
use rules_store::MemoryStore;
use service::{AuditService, RuleService};
use telemetry::LogSettings;
use worker::{CleanupService, WorkerConfig, WorkerScheduler};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    #[serde(default = "default_rate_limit")]
    default_rate_limit_per_minute: u32,
    #[serde(default = "default_rate_limit_window")]
    rate_limit_window_seconds: u64,

    #[serde(default = "default_expired_cleanup_interval")]
    expired_cleanup_interval_seconds: u64,
    #[serde(default = "default_audit_retention_days")]
    audit_retention_days: i64,
    #[serde(default = "default_audit_cleanup_interval")]
    audit_cleanup_interval_seconds: u64,

    #[serde(default = "default_log_filter")]
    log_filter: String,
    #[serde(default)]
    log_json: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_rate_limit() -> u32 {
    100
}

fn default_rate_limit_window() -> u64 {
    60
}

fn default_expired_cleanup_interval() -> u64 {
    300
}

fn default_audit_retention_days() -> i64 {
    90
}

fn default_audit_cleanup_interval() -> u64 {
    86_400
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_rate_limit_per_minute: default_rate_limit(),
            rate_limit_window_seconds: default_rate_limit_window(),
            expired_cleanup_interval_seconds: default_expired_cleanup_interval(),
            audit_retention_days: default_audit_retention_days(),
            audit_cleanup_interval_seconds: default_audit_cleanup_interval(),
            log_filter: default_log_filter(),
            log_json: false,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = load_config()?;

    // Initialize tracing
    telemetry::init(&LogSettings {
        filter: config.log_filter.clone(),
        json: config.log_json,
    });

    info!("Starting Rule Management API v{}", env!("CARGO_PKG_VERSION"));

    // In-memory storage backing both the rule and audit collections
    let store = Arc::new(MemoryStore::new());

    // Create application state
    let state = AppState::new(
        store.clone(),
        store.clone(),
        ApiSettings {
            default_rate_limit: config.default_rate_limit_per_minute,
            rate_limit_window: Duration::from_secs(config.rate_limit_window_seconds),
        },
    );

    // Start background cleanup workers
    let cleanup = CleanupService::new(
        RuleService::new(store.clone()),
        AuditService::new(store.clone()),
    );
    let worker_scheduler = Arc::new(WorkerScheduler::new(
        WorkerConfig {
            expired_rules_interval: Duration::from_secs(config.expired_cleanup_interval_seconds),
            audit_cleanup_interval: Duration::from_secs(config.audit_cleanup_interval_seconds),
            audit_retention_days: config.audit_retention_days,
        },
        cleanup,
    ));
    let _worker_handles = worker_scheduler.start();

    // Create router
    let app = router(state);

    // Start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("RULE_ENGINE")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
