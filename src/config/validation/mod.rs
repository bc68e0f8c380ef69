//! Configuration validation
//!
//! - `trait_def`: the `Validate` trait
//! - `backend_validators`: backend connection settings
//! - `access_validators`: capability table, paths and logging
//! - `tests`: test suite for all validators

mod access_validators;
mod backend_validators;
mod trait_def;

pub use trait_def::Validate;
