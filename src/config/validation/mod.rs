//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `config_validators`: Gateway, server and provider validators
//! - `router_validators`: Router, health and cache validators
//! - `tests`: Test suite for all validators

mod config_validators;
mod router_validators;
mod tests;
mod trait_def;

pub use trait_def::Validate;
