//! Cross-cutting request guards.

pub mod rate_limit;
pub mod tenant;
