//! Storage collaborator interfaces and the in-process document store.
//!
//! The engine only ever talks to storage through the [`RuleStore`] and
//! [`AuditStore`] traits; a backing database can be swapped in behind them.
//! Single-document operations are atomic, cross-document transactions are
//! not assumed.

pub mod audit;
pub mod memory;
pub mod rules;

pub use audit::AuditStore;
pub use memory::MemoryStore;
pub use rules::RuleStore;
