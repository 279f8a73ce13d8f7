//! Audit recording and querying.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, error, info};

use rules_core::{AuditEntry, AuditSummary, Result};
use rules_store::AuditStore;

/// Hard cap on a single audit query.
pub const MAX_AUDIT_QUERY_LIMIT: usize = 1000;

/// Best-effort audit recorder plus query/summarize/purge over the audit
/// collection.
#[derive(Clone)]
pub struct AuditService {
    store: Arc<dyn AuditStore>,
}

impl AuditService {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Persist one entry. Storage failures are logged and swallowed so audit
    /// recording can never break the guarded request.
    pub async fn record(&self, entry: AuditEntry) -> bool {
        let action = entry.action;
        let resource = entry.resource_name.clone();
        match self.store.insert_one(entry).await {
            Ok(()) => {
                debug!(%action, resource, "Audit event logged");
                true
            }
            Err(e) => {
                error!(%action, resource, error = %e, "Failed to log audit event");
                false
            }
        }
    }

    /// Query entries in `[start, end)`, newest first, capped at
    /// [`MAX_AUDIT_QUERY_LIMIT`].
    pub async fn query(
        &self,
        tenant_id: &str,
        limit: usize,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AuditEntry>> {
        let limit = limit.min(MAX_AUDIT_QUERY_LIMIT);
        self.store.find_range(tenant_id, limit, start, end).await
    }

    /// Per-action counts over the trailing `days`.
    pub async fn summarize(&self, tenant_id: &str, days: i64) -> Result<AuditSummary> {
        let since = Utc::now() - Duration::days(days);
        let events_by_action = self.store.count_by_action(tenant_id, since).await?;
        let total_events = events_by_action.values().sum();

        Ok(AuditSummary {
            tenant_id: tenant_id.to_string(),
            period_days: days,
            total_events,
            events_by_action,
        })
    }

    /// Delete entries strictly older than the retention window.
    pub async fn purge(&self, retention_days: i64) -> Result<u64> {
        let cutoff = Utc::now() - Duration::days(retention_days);
        let deleted = self.store.delete_older_than(cutoff).await?;
        if deleted > 0 {
            info!(deleted, retention_days, "Cleaned up old audit logs");
        }
        Ok(deleted)
    }
}
