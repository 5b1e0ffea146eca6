#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod resources;
pub mod routes;
pub mod state;
pub mod test_support;
pub mod trace_ctx;

// Re-exports for public API
pub use config::AppConfig;
pub use error::AppError;
pub use extractors::{Caller, OptionalJson, SessionHandle};
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use resources::LineStore;
pub use state::app_state::AppState;

// Prelude for test convenience
pub mod prelude {
    pub use super::domain::*;
    pub use super::error::*;
    pub use super::middleware::*;
    pub use super::state::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    veridrink_test_support::logging::init();
}
