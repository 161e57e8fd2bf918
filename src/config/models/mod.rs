//! Configuration data models
//!
//! Every field carries a serde default so a partial YAML file is enough.

pub mod cache;
pub mod gateway;
pub mod health;
pub mod provider;
pub mod router;
pub mod server;

pub use cache::*;
pub use gateway::*;
pub use health::*;
pub use provider::*;
pub use router::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

pub fn default_true() -> bool {
    true
}
