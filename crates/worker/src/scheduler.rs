//! Scheduler for the periodic cleanup jobs.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

use crate::cleanup::CleanupService;

/// Worker scheduler configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Expired-rule sweep interval
    pub expired_rules_interval: Duration,
    /// Audit-log purge interval
    pub audit_cleanup_interval: Duration,
    /// Audit entries older than this many days are purged
    pub audit_retention_days: i64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            expired_rules_interval: Duration::from_secs(300), // 5 minutes
            audit_cleanup_interval: Duration::from_secs(86_400), // daily
            audit_retention_days: 90,
        }
    }
}

/// Background worker scheduler.
pub struct WorkerScheduler {
    config: WorkerConfig,
    cleanup: CleanupService,
}

impl WorkerScheduler {
    pub fn new(config: WorkerConfig, cleanup: CleanupService) -> Self {
        Self { config, cleanup }
    }

    /// Starts all background workers.
    pub fn start(self: Arc<Self>) -> Vec<tokio::task::JoinHandle<()>> {
        let mut handles = Vec::new();

        let scheduler = self.clone();
        handles.push(tokio::spawn(async move {
            scheduler.run_expired_rules_worker().await;
        }));

        let scheduler = self.clone();
        handles.push(tokio::spawn(async move {
            scheduler.run_audit_cleanup_worker().await;
        }));

        info!("Background workers started");
        handles
    }

    async fn run_expired_rules_worker(&self) {
        let mut ticker = interval(self.config.expired_rules_interval);

        loop {
            ticker.tick().await;
            self.cleanup.cleanup_expired_rules().await;
        }
    }

    async fn run_audit_cleanup_worker(&self) {
        let mut ticker = interval(self.config.audit_cleanup_interval);

        loop {
            ticker.tick().await;
            self.cleanup
                .cleanup_old_audit_logs(self.config.audit_retention_days)
                .await;
        }
    }
}
