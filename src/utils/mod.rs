//! Utility modules
//!
//! - **error**: the crate-wide error type
//! - **logging**: subscriber installation for binaries

pub mod error;
pub mod logging;

pub use error::{AccessError, Result};
pub use logging::init_tracing;
