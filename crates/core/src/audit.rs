//! Audit trail types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Action recorded on the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    BulkCreate,
    BulkUpdate,
    BulkDelete,
    ExpiredCleanup,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::BulkCreate => "bulk_create",
            Self::BulkUpdate => "bulk_update",
            Self::BulkDelete => "bulk_delete",
            Self::ExpiredCleanup => "expired_cleanup",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable, append-only record of an action taken.
///
/// The timestamp is assigned at construction; entries are never updated and
/// are deleted only by the retention purge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub tenant_id: String,
    pub action: AuditAction,
    pub resource_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_data: Option<Value>,
    pub user_id: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        tenant_id: impl Into<String>,
        action: AuditAction,
        resource_name: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id: tenant_id.into(),
            action,
            resource_name: resource_name.into(),
            resource_data: None,
            user_id: user_id.into(),
            metadata: Map::new(),
            timestamp: Utc::now(),
        }
    }

    /// Attach a snapshot of the resource payload.
    pub fn with_data(mut self, data: Value) -> Self {
        self.resource_data = Some(data);
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Aggregated audit activity for a tenant over a trailing period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSummary {
    pub tenant_id: String,
    pub period_days: i64,
    pub total_events: u64,
    pub events_by_action: BTreeMap<String, u64>,
}
