//! Integration tests
//!
//! These tests exercise components through the public API, with the
//! scripted transport standing in for real providers.

pub mod config_tests;
pub mod error_handling_tests;
pub mod health_tests;
pub mod orchestrator_tests;
pub mod sync_tests;
