//! Error handling for the access-control core
//!
//! This module defines the error type shared by the backend client, the
//! configuration loader and the role resolver.

mod helpers;
mod types;

pub use types::{AccessError, Result};
