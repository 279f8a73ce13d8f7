//! Background workers for expired-rule and audit-log cleanup.

pub mod cleanup;
pub mod scheduler;

pub use cleanup::{CleanupOutcome, CleanupService};
pub use scheduler::{WorkerConfig, WorkerScheduler};
