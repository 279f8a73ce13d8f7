//! Tenant permission tokens.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Permission token a tenant may hold for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Read,
    Write,
    Delete,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full default permission set granted on registration when no explicit
/// set is supplied, and implicitly assumed for unregistered tenants.
pub fn default_permissions() -> HashSet<Permission> {
    HashSet::from([Permission::Read, Permission::Write, Permission::Delete])
}
