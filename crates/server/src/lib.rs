//! HTTP surface of the warranty service: router, handlers, middleware and startup.

pub mod errors;
pub mod extract;
pub mod openapi;
pub mod rate_limit;
pub mod routes;
pub mod security;
pub mod startup;
pub mod state;


pub use startup::{build_app, run};
pub use state::AppState;
