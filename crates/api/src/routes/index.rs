//! Service index endpoint.

use axum::Json;
use serde_json::{json, Value};

/// GET / - service discovery stub.
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "message": "Rule Management API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "rules": "/api/v1/rules",
            "bulk_operations": "/api/v1/bulk/rules",
            "audit": "/api/v1/audit",
        },
    }))
}
