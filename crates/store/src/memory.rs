//! In-process document store.
//!
//! Backs both collections with `parking_lot::RwLock`-guarded vectors. Each
//! trait method takes the lock once, so single-document operations are
//! atomic; nothing is held across awaits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::BTreeMap;

use rules_core::{AuditEntry, Result, Rule, RuleInput};

use crate::audit::AuditStore;
use crate::rules::RuleStore;

/// In-memory implementation of both storage collaborators.
#[derive(Default)]
pub struct MemoryStore {
    rules: RwLock<Vec<Rule>>,
    audit: RwLock<Vec<AuditEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_created_first(rules: &mut [Rule]) {
    rules.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[async_trait]
impl RuleStore for MemoryStore {
    async fn find_one(&self, tenant_id: &str, name: &str) -> Result<Option<Rule>> {
        let rules = self.rules.read();
        Ok(rules
            .iter()
            .find(|r| r.tenant_id == tenant_id && r.name == name)
            .cloned())
    }

    async fn insert_one(&self, rule: Rule) -> Result<()> {
        self.rules.write().push(rule);
        Ok(())
    }

    async fn update_one(
        &self,
        tenant_id: &str,
        name: &str,
        input: &RuleInput,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let mut rules = self.rules.write();
        match rules
            .iter_mut()
            .find(|r| r.tenant_id == tenant_id && r.name == name)
        {
            Some(rule) => {
                rule.name = input.name.clone();
                rule.description = input.description.clone();
                rule.ip = input.ip.clone();
                rule.expired_date = input.expired_date;
                rule.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_one(&self, tenant_id: &str, name: &str) -> Result<bool> {
        let mut rules = self.rules.write();
        let before = rules.len();
        rules.retain(|r| !(r.tenant_id == tenant_id && r.name == name));
        Ok(rules.len() < before)
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>, tenant_id: Option<&str>) -> Result<u64> {
        let mut rules = self.rules.write();
        let before = rules.len();
        rules.retain(|r| {
            let in_scope = tenant_id.map_or(true, |t| r.tenant_id == t);
            let past_due = r.expired_date.is_some_and(|d| d <= cutoff);
            !(in_scope && past_due)
        });
        Ok((before - rules.len()) as u64)
    }

    async fn find_by_tenant(
        &self,
        tenant_id: &str,
        include_expired: bool,
        now: DateTime<Utc>,
    ) -> Result<Vec<Rule>> {
        let rules = self.rules.read();
        let mut matched: Vec<Rule> = rules
            .iter()
            .filter(|r| r.tenant_id == tenant_id)
            .filter(|r| include_expired || !r.is_expired_at(now))
            .cloned()
            .collect();
        newest_created_first(&mut matched);
        Ok(matched)
    }

    async fn count_by_tenant(&self, tenant_id: &str) -> Result<u64> {
        let rules = self.rules.read();
        Ok(rules.iter().filter(|r| r.tenant_id == tenant_id).count() as u64)
    }

    async fn search(&self, tenant_id: &str, query: &str) -> Result<Vec<Rule>> {
        let needle = query.to_lowercase();
        let rules = self.rules.read();
        let mut matched: Vec<Rule> = rules
            .iter()
            .filter(|r| r.tenant_id == tenant_id)
            .filter(|r| {
                r.name.to_lowercase().contains(&needle)
                    || r.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        newest_created_first(&mut matched);
        Ok(matched)
    }
}

#[async_trait]
impl AuditStore for MemoryStore {
    async fn insert_one(&self, entry: AuditEntry) -> Result<()> {
        self.audit.write().push(entry);
        Ok(())
    }

    async fn find_range(
        &self,
        tenant_id: &str,
        limit: usize,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AuditEntry>> {
        let audit = self.audit.read();
        let mut matched: Vec<AuditEntry> = audit
            .iter()
            .filter(|e| e.tenant_id == tenant_id)
            .filter(|e| e.timestamp >= start && e.timestamp < end)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matched.truncate(limit);
        Ok(matched)
    }

    async fn count_by_action(
        &self,
        tenant_id: &str,
        since: DateTime<Utc>,
    ) -> Result<BTreeMap<String, u64>> {
        let audit = self.audit.read();
        let mut counts = BTreeMap::new();
        for entry in audit
            .iter()
            .filter(|e| e.tenant_id == tenant_id && e.timestamp >= since)
        {
            *counts.entry(entry.action.as_str().to_string()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let mut audit = self.audit.write();
        let before = audit.len();
        audit.retain(|e| e.timestamp >= cutoff);
        Ok((before - audit.len()) as u64)
    }
}
