//! Utility modules for the orchestrator
//!
//! ## Module Organization
//!
//! - **error**: Error types and their HTTP mapping
//! - **logging**: Tracing subscriber setup
//! - **sync**: Concurrency primitives (counters, maps, queues, caches, pools, locks)

pub mod error;
pub mod logging;
pub mod sync;

pub use error::{GatewayError, Result};
pub use logging::LogFormat;
