//! Bulk endpoint behavior, including partial-failure status codes.

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use integration_tests::{fixtures, setup::TestContext};
use rules_core::AuditAction;
use serde_json::{json, Value};

#[tokio::test]
async fn test_all_operations_succeed() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/v1/bulk/rules")
        .add_header("X-Tenant-ID", "acme")
        .json(&fixtures::bulk_payload(vec![
            fixtures::bulk_create_op("rule-a"),
            fixtures::bulk_create_op("rule-b"),
        ]))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Bulk operations processed");
    assert_eq!(body["summary"]["total_operations"], 2);
    assert_eq!(body["summary"]["successful"], 2);
    assert_eq!(body["summary"]["failed"], 0);
    assert_eq!(body["summary"]["success_rate"], "100.0%");
}

#[tokio::test]
async fn test_partial_failure_is_multi_status() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/v1/bulk/rules")
        .add_header("X-Tenant-ID", "acme")
        .json(&fixtures::bulk_payload(vec![
            fixtures::bulk_create_op("rule-a"),
            fixtures::bulk_create_op("rule-a"), // duplicate fails
            fixtures::bulk_create_op("rule-b"),
        ]))
        .await;

    response.assert_status(StatusCode::MULTI_STATUS);
    let body: Value = response.json();
    assert_eq!(body["summary"]["successful"], 2);
    assert_eq!(body["summary"]["failed"], 1);

    let failed = body["results"]["failed"].as_array().unwrap();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0]["index"], 1);
    assert!(failed[0]["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_all_failures_is_bad_request() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/v1/bulk/rules")
        .add_header("X-Tenant-ID", "acme")
        .json(&fixtures::bulk_payload(vec![
            json!({ "operation": "teleport", "data": {} }),
            json!({ "operation": "delete", "rule_name": "ghost" }),
        ]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["summary"]["failed"], 2);
    assert_eq!(body["summary"]["success_rate"], "0.0%");
}

#[tokio::test]
async fn test_missing_operations_list_rejected() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/v1/bulk/rules")
        .add_header("X-Tenant-ID", "acme")
        .json(&json!({ "rules": [] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_batch_records_single_audit_entry() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    server
        .post("/api/v1/bulk/rules")
        .add_header("X-Tenant-ID", "acme")
        .add_header("X-User-ID", "alice")
        .json(&fixtures::bulk_payload(vec![
            fixtures::bulk_create_op("rule-a"),
            fixtures::bulk_create_op("rule-a"),
        ]))
        .await
        .assert_status(StatusCode::MULTI_STATUS);

    let entries = ctx
        .state
        .audit
        .query(
            "acme",
            100,
            Utc::now() - Duration::hours(1),
            Utc::now() + Duration::seconds(1),
        )
        .await
        .unwrap();

    assert_eq!(entries.len(), 1, "one aggregate entry per batch");
    assert_eq!(entries[0].action, AuditAction::BulkCreate);
    assert_eq!(entries[0].user_id, "alice");
    let data = entries[0].resource_data.as_ref().unwrap();
    assert_eq!(data["total_operations"], 2);
    assert_eq!(data["successful"], 1);
    assert_eq!(data["failed"], 1);
}
