//! Rules collection interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rules_core::{Result, Rule, RuleInput};

/// Storage collaborator for the rules collection.
///
/// `(tenant_id, name)` is the document key; listings are sorted by creation
/// time descending.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// Point lookup by (tenant, name).
    async fn find_one(&self, tenant_id: &str, name: &str) -> Result<Option<Rule>>;

    /// Insert one rule document.
    async fn insert_one(&self, rule: Rule) -> Result<()>;

    /// Patch one rule by (tenant, name) with the full validated field set.
    /// Returns whether a document was matched.
    async fn update_one(
        &self,
        tenant_id: &str,
        name: &str,
        input: &RuleInput,
        updated_at: DateTime<Utc>,
    ) -> Result<bool>;

    /// Delete one rule by (tenant, name). Returns whether a document existed.
    async fn delete_one(&self, tenant_id: &str, name: &str) -> Result<bool>;

    /// Delete every rule whose expiration is at or before `cutoff`,
    /// optionally scoped to one tenant. Returns the deleted count.
    async fn delete_expired(&self, cutoff: DateTime<Utc>, tenant_id: Option<&str>) -> Result<u64>;

    /// Find rules for a tenant, newest created first. When `include_expired`
    /// is false, rules expired as of `now` are filtered out.
    async fn find_by_tenant(
        &self,
        tenant_id: &str,
        include_expired: bool,
        now: DateTime<Utc>,
    ) -> Result<Vec<Rule>>;

    /// Count all rules for a tenant.
    async fn count_by_tenant(&self, tenant_id: &str) -> Result<u64>;

    /// Case-insensitive substring search over name and description,
    /// newest created first.
    async fn search(&self, tenant_id: &str, query: &str) -> Result<Vec<Rule>>;
}
