//! Health monitoring for providers
//!
//! Keeps a per-provider side-table of live health, fed by two sources:
//! background probes and the outcome of every dispatch attempt.
//!
//! # Module Structure
//!
//! - `types` - Status ladder and check results
//! - `provider` - Per-provider health record and its update rules
//! - `monitor` - Health monitor, background scheduler and probe workers
//! - `checker` - Probe execution and health queries

pub mod checker;
pub mod monitor;
pub mod provider;
pub mod types;

pub use monitor::{HealthMonitor, HealthMonitorConfig};
pub use provider::ProviderHealth;
pub use types::{HealthCheckResult, HealthStatus};
