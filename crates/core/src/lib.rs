//! Core types, schemas, and validation for the rule engine.

pub mod audit;
pub mod error;
pub mod rule;
pub mod tenant;

pub use audit::*;
pub use error::{Error, Result};
pub use rule::*;
pub use tenant::*;
