//! Rule model and input validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use validator::Validate;

use crate::error::{Error, Result};

/// Validated client input for creating or fully updating a rule.
///
/// On update the whole document is replaced field-for-field, so every field
/// is required; an absent `expired_date` clears the expiration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RuleInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    pub ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired_date: Option<DateTime<Utc>>,
}

impl RuleInput {
    /// Run schema validation plus the IP syntax check.
    pub fn validated(self) -> Result<Self> {
        self.validate()
            .map_err(|e| Error::validation(e.to_string()))?;

        self.ip
            .parse::<IpAddr>()
            .map_err(|_| Error::validation(format!("invalid IP address format: '{}'", self.ip)))?;

        Ok(self)
    }
}

/// A named IP allowlist/denylist entry, unique per (tenant, name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub description: String,
    pub ip: String,
    pub tenant_id: String,
    pub expired_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rule {
    /// Build a new rule from validated input, stamping both timestamps.
    pub fn new(tenant_id: impl Into<String>, input: RuleInput) -> Self {
        let now = Utc::now();
        Self {
            name: input.name,
            description: input.description,
            ip: input.ip,
            tenant_id: tenant_id.into(),
            expired_date: input.expired_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// A rule is expired iff an expiration is set and is at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expired_date {
            Some(expired) => expired <= now,
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
