//! Audit collection interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rules_core::{AuditEntry, Result};
use std::collections::BTreeMap;

/// Storage collaborator for the append-only audit collection.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Append one audit entry.
    async fn insert_one(&self, entry: AuditEntry) -> Result<()>;

    /// Find entries for a tenant with timestamp in `[start, end)`,
    /// newest first, bounded by `limit`.
    async fn find_range(
        &self,
        tenant_id: &str,
        limit: usize,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AuditEntry>>;

    /// Count entries per action for a tenant since `since`.
    async fn count_by_action(
        &self,
        tenant_id: &str,
        since: DateTime<Utc>,
    ) -> Result<BTreeMap<String, u64>>;

    /// Delete entries strictly older than `cutoff`. Returns the deleted count.
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64>;
}
