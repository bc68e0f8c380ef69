//! Role lookup through the backend

use crate::auth::Principal;
use crate::auth::rbac::RoleSet;
use crate::config::BackendConfig;
use crate::utils::error::{AccessError, Result};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

use super::{RemoteCall, RoleSource};

/// Fetches roles with the backend's "current user roles" method.
///
/// The call carries no parameters; the backend scopes it to the
/// authenticated session.
pub struct BackendRoleSource {
    client: Arc<dyn RemoteCall>,
    endpoint: String,
}

impl BackendRoleSource {
    pub fn new(client: Arc<dyn RemoteCall>, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(client: Arc<dyn RemoteCall>, config: &BackendConfig) -> Self {
        Self::new(client, config.roles_endpoint.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RoleSource for BackendRoleSource {
    async fn fetch_roles(&self, principal: &Principal) -> Result<RoleSet> {
        debug!(principal = %principal.id, endpoint = %self.endpoint, "Requesting roles");
        match self.client.call(&self.endpoint, json!({})).await {
            Ok(payload) => Ok(parse_roles_payload(&payload)),
            Err(AccessError::Parsing(message)) => {
                warn!(error = %message, "Malformed roles response, treating as no roles");
                Ok(RoleSet::new())
            }
            Err(e) => Err(e),
        }
    }
}

/// Parse `{ roles: [...] }`. Anything malformed yields zero roles.
pub fn parse_roles_payload(payload: &Value) -> RoleSet {
    if let Some(error) = payload.get("error").and_then(Value::as_str) {
        warn!(error, "Backend reported an error while listing roles");
    }

    match payload.get("roles").and_then(Value::as_array) {
        Some(roles) => RoleSet::from_names(roles.iter().filter_map(Value::as_str)),
        None => RoleSet::new(),
    }
}
