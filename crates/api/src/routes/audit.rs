//! Audit log query endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use rules_core::{Error, Permission};

use crate::extractors::RequestContext;
use crate::guard::{run_guarded, Guarded};
use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AuditLogsQuery {
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default = "default_days")]
    days: i64,
}

fn default_limit() -> usize {
    100
}

fn default_days() -> i64 {
    30
}

/// GET /api/v1/audit/logs - recent audit entries for the calling tenant.
pub async fn get_audit_logs(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<AuditLogsQuery>,
) -> Result<Guarded<Value>, ApiError> {
    run_guarded(
        &state,
        &ctx,
        Permission::Read,
        None,
        StatusCode::OK,
        || async {
            let end = Utc::now();
            let start = end - Duration::days(query.days);
            let entries = state
                .audit
                .query(&ctx.tenant_id, query.limit, start, end)
                .await?;

            let logs: Vec<Value> = entries
                .iter()
                .map(|e| {
                    json!({
                        "action": e.action,
                        "resource_name": e.resource_name,
                        "user_id": e.user_id,
                        "timestamp": e.timestamp.to_rfc3339(),
                        "metadata": e.metadata,
                    })
                })
                .collect();

            Ok(json!({
                "audit_logs": logs,
                "total_count": logs.len(),
                "tenant_id": ctx.tenant_id,
                "period": {
                    "start_date": start.to_rfc3339(),
                    "end_date": end.to_rfc3339(),
                    "days": query.days,
                },
            }))
        },
    )
    .await
}

#[derive(Debug, Deserialize)]
pub struct AuditSummaryQuery {
    #[serde(default = "default_days")]
    days: i64,
}

/// GET /api/v1/audit/summary - per-action counts over a trailing window.
pub async fn get_audit_summary(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<AuditSummaryQuery>,
) -> Result<Guarded<Value>, ApiError> {
    run_guarded(
        &state,
        &ctx,
        Permission::Read,
        None,
        StatusCode::OK,
        || async {
            let summary = state.audit.summarize(&ctx.tenant_id, query.days).await?;
            serde_json::to_value(summary).map_err(|e| Error::internal(e.to_string()))
        },
    )
    .await
}
