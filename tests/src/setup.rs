//! Common test setup functions.

use std::sync::Arc;

use api::{router, ApiSettings, AppState};
use axum::Router;
use rules_store::MemoryStore;

use crate::mocks::FailingAuditStore;

/// Test context wiring the real router over in-memory stores.
///
/// Rules live in a [`MemoryStore`]; audit entries go through a
/// [`FailingAuditStore`] so tests can verify both the recorded entries and
/// the fail-soft behavior when audit writes break.
pub struct TestContext {
    pub rule_store: Arc<MemoryStore>,
    pub audit_store: Arc<FailingAuditStore>,
    pub state: AppState,
    pub router: Router,
}

impl TestContext {
    /// Context with a rate limit high enough to stay out of the way.
    pub fn new() -> Self {
        Self::with_rate_limit(1000)
    }

    /// Context with a specific per-tenant rate limit.
    pub fn with_rate_limit(limit: u32) -> Self {
        let rule_store = Arc::new(MemoryStore::new());
        let audit_store = Arc::new(FailingAuditStore::new());

        let state = AppState::new(
            rule_store.clone(),
            audit_store.clone(),
            ApiSettings {
                default_rate_limit: limit,
                ..ApiSettings::default()
            },
        );
        let router = router(state.clone());

        Self {
            rule_store,
            audit_store,
            state,
            router,
        }
    }

    /// Make every audit write fail from now on.
    pub fn break_audit_storage(&self) {
        self.audit_store.set_should_fail(true);
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
