//! API routes.

pub mod audit;
pub mod bulk;
pub mod index;
pub mod rules;

use axum::{
    body::Bytes,
    routing::{get, post},
    Router,
};
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use rules_core::Error;

use crate::state::AppState;

/// Creates the API router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index::index_handler))
        .route("/api/v1/rules", post(rules::create_rule).get(rules::list_rules))
        .route(
            "/api/v1/rules/:rule_name",
            get(rules::get_rule)
                .put(rules::update_rule)
                .delete(rules::delete_rule),
        )
        .route("/api/v1/bulk/rules", post(bulk::bulk_rules))
        .route("/api/v1/audit/logs", get(audit::get_audit_logs))
        .route("/api/v1/audit/summary", get(audit::get_audit_summary))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Parse a required JSON body, rejecting missing/empty/malformed input.
///
/// Returns a domain error so handlers can defer the failure until the guard
/// pipeline has run; a bad body still consumes rate-limit quota and lands on
/// the audit trail.
pub(crate) fn parse_json_body(body: &Bytes) -> rules_core::Result<Value> {
    if body.is_empty() {
        return Err(Error::bad_request("Request body is required"));
    }
    serde_json::from_slice(body)
        .map_err(|e| Error::bad_request(format!("Invalid JSON body: {e}")))
}
