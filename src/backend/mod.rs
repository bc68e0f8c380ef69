//! Backend collaborator
//!
//! The backend is reached through one generic request/response call,
//! `call(endpoint, params) -> message`. Everything else in the crate depends
//! on the [`RemoteCall`] and [`RoleSource`] traits, not on HTTP.

mod client;
mod roles;

pub use client::BackendClient;
pub use roles::{BackendRoleSource, parse_roles_payload};

use crate::auth::Principal;
use crate::auth::rbac::RoleSet;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Remote procedure call against the backend.
///
/// Returns the unwrapped `message` payload of the `{ "message": T }` envelope,
/// or `Value::Null` when the envelope carries no message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteCall: Send + Sync {
    async fn call(&self, endpoint: &str, params: Value) -> Result<Value>;
}

/// Source of the role names held by a principal
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleSource: Send + Sync {
    async fn fetch_roles(&self, principal: &Principal) -> Result<RoleSet>;
}
