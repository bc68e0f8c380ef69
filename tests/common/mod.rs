//! Common test utilities for library-access
//!
//! # Usage
//!
//! ```rust
//! use crate::common::fixtures::{StaticRoleSource, principal};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let source = StaticRoleSource::new().with_roles("a@example.org", &["Librarian"]);
//!     // ...
//! }
//! ```

pub mod fixtures;

pub use fixtures::{FailingRoleSource, StaticRoleSource, backend_config, principal, resolver};

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

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
