//! HTTP API layer for the rule engine.

pub mod extractors;
pub mod guard;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::{ApiSettings, AppState};
