//! Guard pipeline composing the cross-cutting request checks.
//!
//! Every guarded handler runs through the same fixed order:
//! rate limit, permission check, handler, audit record. Tenant extraction
//! happens earlier, in [`RequestContext`](crate::extractors::RequestContext),
//! so a missing tenant header never consumes rate-limit quota.

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;

use rules_core::{AuditAction, AuditEntry, Error, Permission};

use crate::extractors::RequestContext;
use crate::response::ApiError;
use crate::state::AppState;

/// What to record about a guarded mutation.
pub struct AuditSpec {
    pub action: AuditAction,
    /// From the JSON body for write methods, from path parameters otherwise.
    pub resource_name: Option<String>,
    /// Snapshot of the request body for write methods.
    pub payload: Option<Value>,
}

impl AuditSpec {
    pub fn new(action: AuditAction) -> Self {
        Self {
            action,
            resource_name: None,
            payload: None,
        }
    }

    pub fn resource(mut self, name: impl Into<String>) -> Self {
        self.resource_name = Some(name.into());
        self
    }

    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Successful guarded response carrying rate-limit observability headers.
#[derive(Debug)]
pub struct Guarded<T> {
    pub status: StatusCode,
    pub body: T,
    limit: u32,
    remaining: i64,
    reset: i64,
}

impl<T> Guarded<T> {
    /// Transform the body while keeping the rate-limit headers.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Guarded<U> {
        Guarded {
            status: self.status,
            body: f(self.body),
            limit: self.limit,
            remaining: self.remaining,
            reset: self.reset,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl<T: Serialize> IntoResponse for Guarded<T> {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.body)).into_response();
        let headers = response.headers_mut();
        headers.insert("X-RateLimit-Limit", HeaderValue::from(self.limit));
        headers.insert("X-RateLimit-Remaining", HeaderValue::from(self.remaining));
        headers.insert("X-RateLimit-Reset", HeaderValue::from(self.reset));
        response
    }
}

/// Run `handler` behind the full guard pipeline.
///
/// Rate-limit and permission denials short-circuit without an audit entry.
/// Once the handler runs, exactly one audit entry is recorded per
/// `AuditSpec`, success or failure, and a handler error still propagates
/// after the entry is written.
pub async fn run_guarded<T, F, Fut>(
    state: &AppState,
    ctx: &RequestContext,
    required: Permission,
    audit: Option<AuditSpec>,
    success_status: StatusCode,
    handler: F,
) -> Result<Guarded<T>, ApiError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = rules_core::Result<T>>,
{
    let decision = state
        .rate_limiter
        .check(&ctx.tenant_id, state.settings.default_rate_limit);
    if !decision.allowed {
        return Err(Error::RateLimitExceeded(ctx.tenant_id.clone()).into());
    }

    if !state.tenants.has_permission(&ctx.tenant_id, required) {
        return Err(Error::forbidden(&ctx.tenant_id, required.as_str()).into());
    }

    let result = handler().await;

    if let Some(spec) = audit {
        state.audit.record(audit_entry(ctx, spec, &result)).await;
    }

    let body = result.map_err(ApiError::from)?;
    Ok(Guarded {
        status: success_status,
        body,
        limit: decision.limit,
        remaining: decision.remaining,
        reset: decision.reset,
    })
}

fn audit_entry<T>(
    ctx: &RequestContext,
    spec: AuditSpec,
    result: &rules_core::Result<T>,
) -> AuditEntry {
    let mut entry = AuditEntry::new(
        ctx.tenant_id.clone(),
        spec.action,
        spec.resource_name.unwrap_or_else(|| "unknown".to_string()),
        ctx.user_id.clone(),
    );

    if let Some(payload) = spec.payload {
        entry = entry.with_data(payload);
    }

    entry = entry
        .with_meta("ip_address", optional(ctx.client_ip.clone()))
        .with_meta("user_agent", optional(ctx.user_agent.clone()));

    match result {
        Ok(_) => entry.with_meta("status", "success"),
        Err(e) => entry
            .with_meta("status", "failed")
            .with_meta("error", e.to_string()),
    }
}

fn optional(value: Option<String>) -> Value {
    value.map(Value::String).unwrap_or(Value::Null)
}
