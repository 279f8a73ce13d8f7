//! Bulk operation orchestrator.
//!
//! Sub-operations are isolated: each is applied as its own result value and a
//! failure never unwinds the batch loop. The batch emits a single aggregate
//! audit entry after all items are processed.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::error;

use rules_core::{AuditAction, AuditEntry, Error, Result, RuleInput};

use crate::audit::AuditService;
use crate::rules::RuleService;

/// Batch size bound, enforced at the request boundary.
pub const MAX_BULK_OPERATIONS: usize = 100;

/// One submitted sub-operation. `operation` and `data` stay loosely typed so
/// a malformed item fails on its own instead of rejecting the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkOperation {
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
}

/// Outcome of one applied sub-operation.
#[derive(Debug, Clone, Serialize)]
pub struct BulkItemResult {
    pub action: String,
    pub rule_name: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkSuccess {
    pub index: usize,
    pub operation: BulkOperation,
    pub result: BulkItemResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkFailure {
    pub index: usize,
    pub operation: BulkOperation,
    pub error: String,
}

/// Aggregated batch outcome; not persisted, only summarized to the audit
/// trail.
#[derive(Debug, Clone, Serialize)]
pub struct BulkReport {
    pub total: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub successful: Vec<BulkSuccess>,
    pub failed: Vec<BulkFailure>,
}

impl BulkReport {
    pub fn all_succeeded(&self) -> bool {
        self.failure_count == 0
    }

    pub fn all_failed(&self) -> bool {
        self.success_count == 0
    }
}

/// Drives a sequence of create/update/delete sub-operations against the rule
/// service.
#[derive(Clone)]
pub struct BulkOperationService {
    rules: RuleService,
    audit: AuditService,
}

impl BulkOperationService {
    pub fn new(rules: RuleService, audit: AuditService) -> Self {
        Self { rules, audit }
    }

    /// Process operations in input order, isolating per-item failures, then
    /// emit one aggregate audit entry for the batch.
    pub async fn process(
        &self,
        tenant_id: &str,
        operations: Vec<BulkOperation>,
        user_id: &str,
    ) -> BulkReport {
        let mut report = BulkReport {
            total: operations.len(),
            success_count: 0,
            failure_count: 0,
            successful: Vec::new(),
            failed: Vec::new(),
        };

        for (index, operation) in operations.into_iter().enumerate() {
            match self.apply_one(tenant_id, &operation).await {
                Ok(result) => {
                    report.success_count += 1;
                    report.successful.push(BulkSuccess {
                        index,
                        operation,
                        result,
                    });
                }
                Err(err) => {
                    error!(tenant_id, index, error = %err, "Bulk operation failed");
                    report.failure_count += 1;
                    report.failed.push(BulkFailure {
                        index,
                        operation,
                        error: err.to_string(),
                    });
                }
            }
        }

        // Batches always audit as bulk_create regardless of the operation mix.
        let entry = AuditEntry::new(tenant_id, AuditAction::BulkCreate, "bulk_operations", user_id)
            .with_data(json!({
                "total_operations": report.total,
                "successful": report.success_count,
                "failed": report.failure_count,
            }));
        self.audit.record(entry).await;

        report
    }

    async fn apply_one(&self, tenant_id: &str, op: &BulkOperation) -> Result<BulkItemResult> {
        match op.operation.to_lowercase().as_str() {
            "create" => {
                let input = parse_rule_input(&op.data)?;
                let rule = self.rules.create_rule(tenant_id, input).await?;
                Ok(item_result("create", rule.name))
            }
            "update" => {
                let name = resolve_rule_name(op, "update")?;
                let input = parse_rule_input(&op.data)?;
                let rule = self.rules.update_rule(tenant_id, &name, input).await?;
                Ok(item_result("update", rule.name))
            }
            "delete" => {
                let name = resolve_rule_name(op, "delete")?;
                self.rules.delete_rule(tenant_id, &name).await?;
                Ok(item_result("delete", name))
            }
            other => Err(Error::validation(format!("unknown operation type: '{other}'"))),
        }
    }
}

fn item_result(action: &str, rule_name: String) -> BulkItemResult {
    BulkItemResult {
        action: action.to_string(),
        rule_name,
        status: "success".to_string(),
    }
}

fn parse_rule_input(data: &Value) -> Result<RuleInput> {
    serde_json::from_value(data.clone()).map_err(|e| Error::validation(e.to_string()))
}

/// `rule_name` wins, falling back to `data.name`.
fn resolve_rule_name(op: &BulkOperation, action: &str) -> Result<String> {
    op.rule_name
        .clone()
        .or_else(|| op.data.get("name").and_then(Value::as_str).map(str::to_string))
        .ok_or_else(|| Error::validation(format!("rule name is required for {action} operation")))
}
