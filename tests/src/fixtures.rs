//! Test data builders.

use chrono::{Duration, Utc};
use serde_json::{json, Value};

/// Minimal valid rule payload.
pub fn rule_payload(name: &str) -> Value {
    json!({
        "name": name,
        "description": format!("Block traffic for {name}"),
        "ip": "192.168.1.10",
    })
}

/// Rule payload with a specific IP.
pub fn rule_payload_with_ip(name: &str, ip: &str) -> Value {
    json!({
        "name": name,
        "description": format!("Block traffic for {name}"),
        "ip": ip,
    })
}

/// Rule payload that expired an hour ago.
pub fn expired_rule_payload(name: &str) -> Value {
    let mut payload = rule_payload(name);
    payload["expired_date"] = json!((Utc::now() - Duration::hours(1)).to_rfc3339());
    payload
}

/// Bulk request body wrapping the given operations.
pub fn bulk_payload(operations: Vec<Value>) -> Value {
    json!({ "operations": operations })
}

/// One create operation for the bulk endpoint.
pub fn bulk_create_op(name: &str) -> Value {
    json!({
        "operation": "create",
        "data": rule_payload(name),
    })
}
