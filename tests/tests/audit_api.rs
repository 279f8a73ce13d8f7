//! Audit trail behavior across the HTTP surface.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};
use serde_json::Value;

fn server(ctx: &TestContext) -> TestServer {
    TestServer::new(ctx.router.clone()).expect("Failed to create test server")
}

#[tokio::test]
async fn test_mutations_are_audited_with_request_metadata() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    server
        .post("/api/v1/rules")
        .add_header("X-Tenant-ID", "acme")
        .add_header("X-User-ID", "alice")
        .json(&fixtures::rule_payload("block-scanner"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get("/api/v1/audit/logs")
        .add_header("X-Tenant-ID", "acme")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["tenant_id"], "acme");
    assert_eq!(body["period"]["days"], 30);

    let entry = &body["audit_logs"][0];
    assert_eq!(entry["action"], "create");
    assert_eq!(entry["resource_name"], "block-scanner");
    assert_eq!(entry["user_id"], "alice");
    assert_eq!(entry["metadata"]["status"], "success");
}

#[tokio::test]
async fn test_failed_mutation_audited_and_error_returned() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    server
        .delete("/api/v1/rules/ghost")
        .add_header("X-Tenant-ID", "acme")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = server
        .get("/api/v1/audit/logs")
        .add_header("X-Tenant-ID", "acme")
        .await;
    let body: Value = response.json();
    assert_eq!(body["total_count"], 1);

    let entry = &body["audit_logs"][0];
    assert_eq!(entry["action"], "delete");
    assert_eq!(entry["metadata"]["status"], "failed");
    assert!(entry["metadata"]["error"]
        .as_str()
        .unwrap()
        .contains("not found"));
}

#[tokio::test]
async fn test_bad_body_mutation_is_audited() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let response = server
        .post("/api/v1/rules")
        .add_header("X-Tenant-ID", "acme")
        .text("{not json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .get("/api/v1/audit/logs")
        .add_header("X-Tenant-ID", "acme")
        .await;
    let body: Value = response.json();
    assert_eq!(body["total_count"], 1);

    let entry = &body["audit_logs"][0];
    assert_eq!(entry["action"], "create");
    assert_eq!(entry["metadata"]["status"], "failed");
    assert!(entry["metadata"]["error"]
        .as_str()
        .unwrap()
        .contains("Invalid JSON body"));
}

#[tokio::test]
async fn test_reads_are_not_audited() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    server
        .post("/api/v1/rules")
        .add_header("X-Tenant-ID", "acme")
        .json(&fixtures::rule_payload("block-scanner"))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .get("/api/v1/rules")
        .add_header("X-Tenant-ID", "acme")
        .await
        .assert_status_ok();
    server
        .get("/api/v1/rules/block-scanner")
        .add_header("X-Tenant-ID", "acme")
        .await
        .assert_status_ok();

    let response = server
        .get("/api/v1/audit/logs")
        .add_header("X-Tenant-ID", "acme")
        .await;
    let body: Value = response.json();
    assert_eq!(body["total_count"], 1, "only the create is audited");
}

#[tokio::test]
async fn test_audit_trail_is_tenant_scoped() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    server
        .post("/api/v1/rules")
        .add_header("X-Tenant-ID", "acme")
        .json(&fixtures::rule_payload("block-scanner"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get("/api/v1/audit/logs")
        .add_header("X-Tenant-ID", "globex")
        .await;
    let body: Value = response.json();
    assert_eq!(body["total_count"], 0);
}

#[tokio::test]
async fn test_summary_counts_by_action() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    server
        .post("/api/v1/rules")
        .add_header("X-Tenant-ID", "acme")
        .json(&fixtures::rule_payload("rule-a"))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/api/v1/rules")
        .add_header("X-Tenant-ID", "acme")
        .json(&fixtures::rule_payload("rule-b"))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .delete("/api/v1/rules/rule-a")
        .add_header("X-Tenant-ID", "acme")
        .await
        .assert_status_ok();

    let response = server
        .get("/api/v1/audit/summary")
        .add_header("X-Tenant-ID", "acme")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["tenant_id"], "acme");
    assert_eq!(body["period_days"], 30);
    assert_eq!(body["total_events"], 3);
    assert_eq!(body["events_by_action"]["create"], 2);
    assert_eq!(body["events_by_action"]["delete"], 1);
}

#[tokio::test]
async fn test_broken_audit_storage_does_not_fail_requests() {
    let ctx = TestContext::new();
    ctx.break_audit_storage();
    let server = server(&ctx);

    server
        .post("/api/v1/rules")
        .add_header("X-Tenant-ID", "acme")
        .json(&fixtures::rule_payload("block-scanner"))
        .await
        .assert_status(StatusCode::CREATED);

    // The rule really was created even though the audit write failed
    server
        .get("/api/v1/rules/block-scanner")
        .add_header("X-Tenant-ID", "acme")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_logs_limit_parameter() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    for i in 0..3 {
        server
            .post("/api/v1/rules")
            .add_header("X-Tenant-ID", "acme")
            .json(&fixtures::rule_payload(&format!("rule-{i}")))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server
        .get("/api/v1/audit/logs")
        .add_query_param("limit", "2")
        .add_header("X-Tenant-ID", "acme")
        .await;
    let body: Value = response.json();
    assert_eq!(body["total_count"], 2);
}
