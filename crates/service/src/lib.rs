//! Domain services for the rule engine.

pub mod audit;
pub mod bulk;
pub mod rules;

pub use audit::{AuditService, MAX_AUDIT_QUERY_LIMIT};
pub use bulk::{BulkOperation, BulkOperationService, BulkReport, MAX_BULK_OPERATIONS};
pub use rules::RuleService;
