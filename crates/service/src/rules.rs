//! Rule CRUD over the storage collaborator.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use rules_core::{Error, Result, Rule, RuleInput};
use rules_store::RuleStore;

/// CRUD, search, and expiration deletion for rules.
#[derive(Clone)]
pub struct RuleService {
    store: Arc<dyn RuleStore>,
}

impl RuleService {
    pub fn new(store: Arc<dyn RuleStore>) -> Self {
        Self { store }
    }

    /// Create a rule from client input. Fails with a conflict if the name is
    /// already taken within the tenant.
    pub async fn create_rule(&self, tenant_id: &str, input: RuleInput) -> Result<Rule> {
        let input = input.validated()?;

        if self.store.find_one(tenant_id, &input.name).await?.is_some() {
            return Err(Error::rule_already_exists(&input.name, tenant_id));
        }

        let rule = Rule::new(tenant_id, input);
        self.store.insert_one(rule.clone()).await?;
        info!(tenant_id, rule_name = %rule.name, "Rule created");
        Ok(rule)
    }

    pub async fn get_rule(&self, tenant_id: &str, name: &str) -> Result<Rule> {
        self.store
            .find_one(tenant_id, name)
            .await?
            .ok_or_else(|| Error::rule_not_found(name, tenant_id))
    }

    /// List rules for a tenant, newest created first.
    pub async fn get_rules(&self, tenant_id: &str, include_expired: bool) -> Result<Vec<Rule>> {
        self.store
            .find_by_tenant(tenant_id, include_expired, Utc::now())
            .await
    }

    /// Replace a rule's fields with freshly validated input. Renaming onto an
    /// existing rule name within the tenant is a conflict.
    pub async fn update_rule(
        &self,
        tenant_id: &str,
        name: &str,
        input: RuleInput,
    ) -> Result<Rule> {
        let input = input.validated()?;

        if self.store.find_one(tenant_id, name).await?.is_none() {
            return Err(Error::rule_not_found(name, tenant_id));
        }

        if input.name != name && self.store.find_one(tenant_id, &input.name).await?.is_some() {
            return Err(Error::rule_already_exists(&input.name, tenant_id));
        }

        let new_name = input.name.clone();
        let matched = self
            .store
            .update_one(tenant_id, name, &input, Utc::now())
            .await?;
        if !matched {
            return Err(Error::rule_not_found(name, tenant_id));
        }

        info!(tenant_id, rule_name = name, "Rule updated");
        self.get_rule(tenant_id, &new_name).await
    }

    pub async fn delete_rule(&self, tenant_id: &str, name: &str) -> Result<()> {
        if !self.store.delete_one(tenant_id, name).await? {
            return Err(Error::rule_not_found(name, tenant_id));
        }
        info!(tenant_id, rule_name = name, "Rule deleted");
        Ok(())
    }

    /// Delete all rules past their expiration, optionally for one tenant.
    pub async fn delete_expired_rules(&self, tenant_id: Option<&str>) -> Result<u64> {
        let deleted = self.store.delete_expired(Utc::now(), tenant_id).await?;
        if deleted > 0 {
            info!(deleted, tenant_id = tenant_id.unwrap_or("all"), "Deleted expired rules");
        }
        Ok(deleted)
    }

    pub async fn search_rules(&self, tenant_id: &str, query: &str) -> Result<Vec<Rule>> {
        self.store.search(tenant_id, query).await
    }

    pub async fn get_rule_count(&self, tenant_id: &str) -> Result<u64> {
        self.store.count_by_tenant(tenant_id).await
    }
}
