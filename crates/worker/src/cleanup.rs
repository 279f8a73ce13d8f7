//! Cleanup jobs for expired rules and old audit logs.
//!
//! Both jobs are scheduler-driven and must never take the process down, so
//! every failure is folded into a [`CleanupOutcome`] instead of propagating.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use rules_core::{AuditAction, AuditEntry};
use service::{AuditService, RuleService};

/// Result of one cleanup run, as reported to logs and callers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CleanupOutcome {
    Success {
        deleted_count: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        retention_days: Option<i64>,
        timestamp: DateTime<Utc>,
    },
    Error {
        error: String,
        timestamp: DateTime<Utc>,
    },
}

impl CleanupOutcome {
    pub fn deleted_count(&self) -> Option<u64> {
        match self {
            Self::Success { deleted_count, .. } => Some(*deleted_count),
            Self::Error { .. } => None,
        }
    }
}

/// Runs the periodic cleanup jobs against the rule and audit services.
#[derive(Clone)]
pub struct CleanupService {
    rules: RuleService,
    audit: AuditService,
}

impl CleanupService {
    pub fn new(rules: RuleService, audit: AuditService) -> Self {
        Self { rules, audit }
    }

    /// Delete expired rules across all tenants and record one system-level
    /// audit entry for the sweep.
    pub async fn cleanup_expired_rules(&self) -> CleanupOutcome {
        match self.rules.delete_expired_rules(None).await {
            Ok(deleted_count) => {
                if deleted_count > 0 {
                    info!(deleted_count, "Cleaned up expired rules");
                }

                let entry = AuditEntry::new(
                    "system",
                    AuditAction::ExpiredCleanup,
                    "expired_rules",
                    "system",
                )
                .with_data(json!({ "deleted_count": deleted_count }));
                self.audit.record(entry).await;

                CleanupOutcome::Success {
                    deleted_count,
                    retention_days: None,
                    timestamp: Utc::now(),
                }
            }
            Err(e) => {
                error!(error = %e, "Error during expired rules cleanup");
                CleanupOutcome::Error {
                    error: e.to_string(),
                    timestamp: Utc::now(),
                }
            }
        }
    }

    /// Purge audit entries older than the retention window.
    pub async fn cleanup_old_audit_logs(&self, retention_days: i64) -> CleanupOutcome {
        match self.audit.purge(retention_days).await {
            Ok(deleted_count) => CleanupOutcome::Success {
                deleted_count,
                retention_days: Some(retention_days),
                timestamp: Utc::now(),
            },
            Err(e) => {
                error!(error = %e, retention_days, "Error during audit log cleanup");
                CleanupOutcome::Error {
                    error: e.to_string(),
                    timestamp: Utc::now(),
                }
            }
        }
    }
}
