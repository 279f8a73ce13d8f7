//! Rule CRUD endpoints.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{json, Value};

use rules_core::{AuditAction, Error, Permission, Rule, RuleInput};

use crate::extractors::RequestContext;
use crate::guard::{run_guarded, AuditSpec, Guarded};
use crate::response::ApiError;
use crate::routes::parse_json_body;
use crate::state::AppState;

/// POST /api/v1/rules - create a rule for the calling tenant.
pub async fn create_rule(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Bytes,
) -> Result<Guarded<Value>, ApiError> {
    let payload = parse_json_body(&body);

    let mut spec = AuditSpec::new(AuditAction::Create);
    if let Ok(payload) = &payload {
        spec = spec.payload(payload.clone());
        if let Some(name) = payload.get("name").and_then(Value::as_str) {
            spec = spec.resource(name);
        }
    }

    run_guarded(
        &state,
        &ctx,
        Permission::Write,
        Some(spec),
        StatusCode::CREATED,
        || async {
            let input: RuleInput = serde_json::from_value(payload?)
                .map_err(|e| Error::validation(e.to_string()))?;
            let rule = state.rules.create_rule(&ctx.tenant_id, input).await?;
            Ok(json!({
                "message": "Rule created successfully",
                "rule": rule_body(&rule, false),
            }))
        },
    )
    .await
}

#[derive(Debug, Deserialize)]
pub struct ListRulesQuery {
    #[serde(default = "default_true")]
    include_expired: bool,
    #[serde(default)]
    search: String,
}

fn default_true() -> bool {
    true
}

/// GET /api/v1/rules - list or search the tenant's rules.
pub async fn list_rules(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<ListRulesQuery>,
) -> Result<Guarded<Value>, ApiError> {
    run_guarded(
        &state,
        &ctx,
        Permission::Read,
        None,
        StatusCode::OK,
        || async {
            let rules = if query.search.is_empty() {
                state
                    .rules
                    .get_rules(&ctx.tenant_id, query.include_expired)
                    .await?
            } else {
                state.rules.search_rules(&ctx.tenant_id, &query.search).await?
            };

            let rules_data: Vec<Value> = rules.iter().map(|r| rule_body(r, true)).collect();
            Ok(json!({
                "rules": rules_data,
                "total_count": rules_data.len(),
                "tenant_id": ctx.tenant_id,
            }))
        },
    )
    .await
}

/// GET /api/v1/rules/:rule_name - point lookup.
pub async fn get_rule(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(rule_name): Path<String>,
) -> Result<Guarded<Value>, ApiError> {
    run_guarded(
        &state,
        &ctx,
        Permission::Read,
        None,
        StatusCode::OK,
        || async {
            let rule = state.rules.get_rule(&ctx.tenant_id, &rule_name).await?;
            Ok(json!({ "rule": rule_body(&rule, true) }))
        },
    )
    .await
}

/// PUT /api/v1/rules/:rule_name - full update of one rule.
pub async fn update_rule(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(rule_name): Path<String>,
    body: Bytes,
) -> Result<Guarded<Value>, ApiError> {
    let payload = parse_json_body(&body);
    let mut spec = AuditSpec::new(AuditAction::Update).resource(rule_name.clone());
    if let Ok(payload) = &payload {
        spec = spec.payload(payload.clone());
    }

    run_guarded(
        &state,
        &ctx,
        Permission::Write,
        Some(spec),
        StatusCode::OK,
        || async {
            let input: RuleInput = serde_json::from_value(payload?)
                .map_err(|e| Error::validation(e.to_string()))?;
            let rule = state
                .rules
                .update_rule(&ctx.tenant_id, &rule_name, input)
                .await?;
            Ok(json!({
                "message": "Rule updated successfully",
                "rule": rule_body(&rule, false),
            }))
        },
    )
    .await
}

/// DELETE /api/v1/rules/:rule_name.
pub async fn delete_rule(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(rule_name): Path<String>,
) -> Result<Guarded<Value>, ApiError> {
    let spec = AuditSpec::new(AuditAction::Delete).resource(rule_name.clone());

    run_guarded(
        &state,
        &ctx,
        Permission::Delete,
        Some(spec),
        StatusCode::OK,
        || async {
            state.rules.delete_rule(&ctx.tenant_id, &rule_name).await?;
            Ok(json!({
                "message": format!("Rule \"{rule_name}\" deleted successfully"),
            }))
        },
    )
    .await
}

/// Wire representation of a rule. Listings and lookups also report the
/// derived expiration state.
fn rule_body(rule: &Rule, with_expired_flag: bool) -> Value {
    let mut body = json!({
        "name": rule.name,
        "description": rule.description,
        "ip": rule.ip,
        "expired_date": rule.expired_date.map(|d| d.to_rfc3339()),
        "created_at": rule.created_at.to_rfc3339(),
        "updated_at": rule.updated_at.to_rfc3339(),
    });
    if with_expired_flag {
        body["is_expired"] = Value::Bool(rule.is_expired());
    }
    body
}
