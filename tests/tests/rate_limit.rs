//! End-to-end rate limiting behavior.

use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use integration_tests::setup::TestContext;
use serde_json::Value;

fn header(response: &TestResponse, name: &str) -> String {
    response
        .headers()
        .get(name)
        .expect("missing rate limit header")
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_requests_denied_after_limit() {
    let ctx = TestContext::with_rate_limit(2);
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let first = server.get("/api/v1/rules").add_header("X-Tenant-ID", "acme").await;
    first.assert_status_ok();
    assert_eq!(header(&first, "X-RateLimit-Limit"), "2");
    assert_eq!(header(&first, "X-RateLimit-Remaining"), "1");

    let second = server.get("/api/v1/rules").add_header("X-Tenant-ID", "acme").await;
    second.assert_status_ok();
    assert_eq!(header(&second, "X-RateLimit-Remaining"), "0");

    let third = server.get("/api/v1/rules").add_header("X-Tenant-ID", "acme").await;
    third.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: Value = third.json();
    assert!(body["error"].as_str().unwrap().contains("rate limit exceeded"));
}

#[tokio::test]
async fn test_bad_body_requests_consume_quota() {
    let ctx = TestContext::with_rate_limit(1);
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    // A body-less mutation fails behind the guard, so it still counts
    let first = server
        .post("/api/v1/rules")
        .add_header("X-Tenant-ID", "acme")
        .await;
    first.assert_status(StatusCode::BAD_REQUEST);

    let second = server
        .post("/api/v1/rules")
        .add_header("X-Tenant-ID", "acme")
        .await;
    second.assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_tenants_have_independent_windows() {
    let ctx = TestContext::with_rate_limit(1);
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    server
        .get("/api/v1/rules")
        .add_header("X-Tenant-ID", "acme")
        .await
        .assert_status_ok();
    server
        .get("/api/v1/rules")
        .add_header("X-Tenant-ID", "acme")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    // A different tenant still has quota
    server
        .get("/api/v1/rules")
        .add_header("X-Tenant-ID", "globex")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_per_tenant_limit_override() {
    let ctx = TestContext::with_rate_limit(1);
    ctx.state.rate_limiter.set_limit("vip", 3);
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    for _ in 0..3 {
        server
            .get("/api/v1/rules")
            .add_header("X-Tenant-ID", "vip")
            .await
            .assert_status_ok();
    }
    server
        .get("/api/v1/rules")
        .add_header("X-Tenant-ID", "vip")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}
