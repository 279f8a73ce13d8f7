//! Bulk rule operations endpoint.

use axum::{body::Bytes, extract::State, http::StatusCode};
use serde_json::{json, Value};

use rules_core::{Error, Permission};
use service::{BulkOperation, BulkReport, MAX_BULK_OPERATIONS};

use crate::extractors::RequestContext;
use crate::guard::{run_guarded, Guarded};
use crate::response::ApiError;
use crate::routes::parse_json_body;
use crate::state::AppState;

/// POST /api/v1/bulk/rules - process a batch of rule operations.
///
/// The aggregate audit entry for the batch is emitted by the orchestrator,
/// so the guard runs without its own audit stage; one entry per batch.
pub async fn bulk_rules(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Bytes,
) -> Result<Guarded<Value>, ApiError> {
    let guarded = run_guarded(
        &state,
        &ctx,
        Permission::Write,
        None,
        StatusCode::OK,
        || async {
            let payload = parse_json_body(&body)?;
            let operations = parse_operations(payload)?;
            Ok(state
                .bulk
                .process(&ctx.tenant_id, operations, &ctx.user_id)
                .await)
        },
    )
    .await?;

    let status = response_status(&guarded.body);
    Ok(guarded
        .map(|report| {
            let success_rate =
                report.success_count as f64 / report.total as f64 * 100.0;
            json!({
                "message": "Bulk operations processed",
                "results": report,
                "summary": {
                    "total_operations": report.total,
                    "successful": report.success_count,
                    "failed": report.failure_count,
                    "success_rate": format!("{success_rate:.1}%"),
                },
            })
        })
        .with_status(status))
}

/// All success 200, all failure 400, mixed 207.
fn response_status(report: &BulkReport) -> StatusCode {
    if report.all_succeeded() {
        StatusCode::OK
    } else if report.all_failed() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::MULTI_STATUS
    }
}

fn parse_operations(payload: Value) -> rules_core::Result<Vec<BulkOperation>> {
    let operations = payload
        .get("operations")
        .cloned()
        .ok_or_else(|| Error::validation("'operations' list is required"))?;

    let operations: Vec<BulkOperation> =
        serde_json::from_value(operations).map_err(|e| Error::validation(e.to_string()))?;

    if operations.is_empty() || operations.len() > MAX_BULK_OPERATIONS {
        return Err(Error::validation(format!(
            "between 1 and {MAX_BULK_OPERATIONS} operations are allowed"
        )));
    }

    Ok(operations)
}
