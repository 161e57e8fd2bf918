//! Common test utilities
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{fixtures, transport::{ScriptedTransport, Step}};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let transport = ScriptedTransport::new().script("a", [Step::Fail("down".into())]);
//!     let harness = fixtures::Harness::new(fixtures::provider_pair(), transport);
//!     // ...
//! }
//! ```

pub mod fixtures;
pub mod transport;

pub use fixtures::Harness;
pub use transport::{ScriptedTransport, Step};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
