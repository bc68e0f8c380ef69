//! Authentication context and authorization
//!
//! `types` models what the auth collaborator tells us, `session` owns the
//! per-sign-in lifecycle, and `rbac` turns role names into access decisions.

pub mod rbac;
pub mod session;
mod types;

pub use session::Session;
pub use types::{AuthState, Principal, PrincipalId};
