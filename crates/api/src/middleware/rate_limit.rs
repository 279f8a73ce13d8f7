//! Per-tenant sliding-window rate limiter.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of one rate-limit check.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Effective limit applied (tenant override or the default).
    pub limit: u32,
    /// Quota left in the current window. May be <= 0 on a denial.
    pub remaining: i64,
    /// Unix timestamp one window-duration from the check.
    pub reset: i64,
}

struct Windows {
    /// Accepted-request timestamps per tenant, pruned lazily on each check.
    requests: HashMap<String, Vec<DateTime<Utc>>>,
    /// Per-tenant overrides of the default limit.
    limits: HashMap<String, u32>,
}

/// Sliding-window rate limiter.
///
/// State is process-local and intentionally not persisted across restarts.
pub struct RateLimiter {
    window: Duration,
    inner: Mutex<Windows>,
}

impl RateLimiter {
    pub fn new(window: std::time::Duration) -> Self {
        Self {
            window: Duration::from_std(window).unwrap_or_else(|_| Duration::seconds(60)),
            inner: Mutex::new(Windows {
                requests: HashMap::new(),
                limits: HashMap::new(),
            }),
        }
    }

    /// Override the default limit for one tenant, effective on the next check.
    pub fn set_limit(&self, tenant_id: &str, limit: u32) {
        self.inner.lock().limits.insert(tenant_id.to_string(), limit);
        info!(tenant_id, limit, "Rate limit set for tenant");
    }

    /// Check and account for a request from `tenant_id`.
    ///
    /// A denied attempt is not recorded against the window.
    pub fn check(&self, tenant_id: &str, default_limit: u32) -> RateLimitDecision {
        self.check_at(tenant_id, default_limit, Utc::now())
    }

    /// [`check`](Self::check) with an explicit clock. Prune, count, and append
    /// happen under one lock so concurrent checks for a tenant cannot
    /// under- or over-count.
    pub fn check_at(
        &self,
        tenant_id: &str,
        default_limit: u32,
        now: DateTime<Utc>,
    ) -> RateLimitDecision {
        let window_start = now - self.window;
        let reset = (now + self.window).timestamp();

        let mut inner = self.inner.lock();
        let limit = inner.limits.get(tenant_id).copied().unwrap_or(default_limit);

        let timestamps = inner.requests.entry(tenant_id.to_string()).or_default();
        timestamps.retain(|t| *t > window_start);

        let count = timestamps.len() as i64;
        if count >= i64::from(limit) {
            warn!(tenant_id, count, limit, "Rate limit exceeded for tenant");
            return RateLimitDecision {
                allowed: false,
                limit,
                remaining: i64::from(limit) - count,
                reset,
            };
        }

        timestamps.push(now);
        RateLimitDecision {
            allowed: true,
            limit,
            remaining: i64::from(limit) - count - 1,
            reset,
        }
    }
}

/// Shared rate limiter state.
pub type SharedRateLimiter = Arc<RateLimiter>;
