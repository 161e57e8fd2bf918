//! Provider catalog and the transport seam
//!
//! The registry is built once from configuration and never written again,
//! so it is shared behind an `Arc` and read without locks. Talking to an
//! upstream is delegated to a [`Transport`] implementation.

pub mod error;
pub mod provider_registry;
pub mod simulated;
pub mod transport;
pub mod types;


pub use error::ProviderError;
pub use provider_registry::ProviderRegistry;
pub use simulated::{SimulatedTransport, SimulationProfile};
pub use transport::Transport;
#[cfg(test)]
pub use transport::MockTransport;
pub use types::{CompletionRequest, CompletionResponse, Connection, Provider, TokenUsage};
