//! Tenant permission registry.

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::info;

use rules_core::{default_permissions, Permission};

/// In-memory tenant permission map.
///
/// Unregistered tenants pass checks for all three canonical permissions;
/// registering a tenant is the way to restrict it.
#[derive(Default)]
pub struct TenantValidator {
    permissions: RwLock<HashMap<String, HashSet<Permission>>>,
}

impl TenantValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or overwrite) a tenant's permission set. `None` grants the full
    /// default set.
    pub fn register_tenant(&self, tenant_id: &str, permissions: Option<HashSet<Permission>>) {
        let granted = permissions.unwrap_or_else(default_permissions);
        self.permissions
            .write()
            .insert(tenant_id.to_string(), granted);
        info!(tenant_id, "Tenant registered");
    }

    pub fn has_permission(&self, tenant_id: &str, permission: Permission) -> bool {
        match self.permissions.read().get(tenant_id) {
            Some(granted) => granted.contains(&permission),
            None => default_permissions().contains(&permission),
        }
    }
}

/// Shared tenant validator state.
pub type SharedTenantValidator = Arc<TenantValidator>;
