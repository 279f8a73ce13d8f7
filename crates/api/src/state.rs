//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use rules_store::{AuditStore, RuleStore};
use service::{AuditService, BulkOperationService, RuleService};

use crate::middleware::rate_limit::{RateLimiter, SharedRateLimiter};
use crate::middleware::tenant::{SharedTenantValidator, TenantValidator};

/// Request-path settings the API layer needs.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Limit applied to tenants without an override.
    pub default_rate_limit: u32,
    /// Sliding-window duration for the rate limiter.
    pub rate_limit_window: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            default_rate_limit: 100,
            rate_limit_window: Duration::from_secs(60),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub rules: RuleService,
    pub audit: AuditService,
    pub bulk: BulkOperationService,
    pub rate_limiter: SharedRateLimiter,
    pub tenants: SharedTenantValidator,
    pub settings: ApiSettings,
}

impl AppState {
    pub fn new(
        rule_store: Arc<dyn RuleStore>,
        audit_store: Arc<dyn AuditStore>,
        settings: ApiSettings,
    ) -> Self {
        let rules = RuleService::new(rule_store);
        let audit = AuditService::new(audit_store);
        let bulk = BulkOperationService::new(rules.clone(), audit.clone());

        Self {
            rules,
            audit,
            bulk,
            rate_limiter: Arc::new(RateLimiter::new(settings.rate_limit_window)),
            tenants: Arc::new(TenantValidator::new()),
            settings,
        }
    }
}
