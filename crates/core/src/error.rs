//! Unified error types for the rule engine.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the rule engine.
///
/// Each variant maps to a caller-visible HTTP status via [`Error::http_status`].
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed request: missing tenant header, missing/empty body.
    #[error("{0}")]
    BadRequest(String),

    /// Tenant lacks the required permission for the action.
    #[error("tenant '{tenant_id}' does not have permission for {permission}")]
    Forbidden {
        tenant_id: String,
        permission: String,
    },

    /// Referenced rule does not exist for the tenant.
    #[error("rule '{rule_name}' not found for tenant '{tenant_id}'")]
    RuleNotFound {
        rule_name: String,
        tenant_id: String,
    },

    /// Rule name already taken within the tenant.
    #[error("rule '{rule_name}' already exists for tenant '{tenant_id}'")]
    RuleAlreadyExists {
        rule_name: String,
        tenant_id: String,
    },

    /// Tenant's request count is at or above its effective limit.
    #[error("rate limit exceeded for tenant '{0}'")]
    RateLimitExceeded(String),

    /// Input fails schema constraints or the IP-format check.
    #[error("validation error: {0}")]
    Validation(String),

    /// Storage collaborator failure.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn forbidden(tenant_id: impl Into<String>, permission: impl Into<String>) -> Self {
        Self::Forbidden {
            tenant_id: tenant_id.into(),
            permission: permission.into(),
        }
    }

    pub fn rule_not_found(rule_name: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self::RuleNotFound {
            rule_name: rule_name.into(),
            tenant_id: tenant_id.into(),
        }
    }

    pub fn rule_already_exists(rule_name: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self::RuleAlreadyExists {
            rule_name: rule_name.into(),
            tenant_id: tenant_id.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Forbidden { .. } => 403,
            Self::RuleNotFound { .. } => 404,
            Self::RuleAlreadyExists { .. } => 409,
            Self::RateLimitExceeded(_) => 429,
            Self::Validation(_) => 400,
            Self::Storage(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// Whether the raw message must be masked before reaching the caller.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Internal(_))
    }
}
