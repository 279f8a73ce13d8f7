//! Request extractors.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::response::ApiError;

/// Per-request caller identity and metadata.
///
/// Rejects with a 400 when the tenant header is missing, before any
/// rate-limit accounting or audit recording happens.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Tenant identity from `X-Tenant-ID` (required).
    pub tenant_id: String,
    /// Acting user from `X-User-ID`, defaulting to "system".
    pub user_id: String,
    /// Caller IP from proxy headers, when present.
    pub client_ip: Option<String>,
    /// `User-Agent` header, when present.
    pub user_agent: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tenant_id = parts
            .headers
            .get("X-Tenant-ID")
            .and_then(|h| h.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ApiError::bad_request("X-Tenant-ID header is required"))?;

        let user_id = parts
            .headers
            .get("X-User-ID")
            .and_then(|h| h.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or("system")
            .to_string();

        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);

        Ok(RequestContext {
            tenant_id,
            user_id,
            client_ip: client_ip(parts),
            user_agent,
        })
    }
}

/// Resolve the caller IP: first hop of `X-Forwarded-For`, then `X-Real-IP`.
fn client_ip(parts: &Parts) -> Option<String> {
    if let Some(xff) = parts.headers.get("X-Forwarded-For") {
        if let Ok(chain) = xff.to_str() {
            if let Some(first) = chain.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return Some(first.to_string());
                }
            }
        }
    }

    parts
        .headers
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
}
