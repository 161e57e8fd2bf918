//! Error handling for the orchestrator
//!
//! This module defines the crate-level error type used outside the routing
//! hot path (configuration, startup, HTTP surface).

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

// Re-export all public types
pub use response::{ErrorDetail, ErrorResponse};
pub use types::{GatewayError, Result};
