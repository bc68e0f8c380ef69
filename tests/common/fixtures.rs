//! Test fixtures and data factories
//!
//! Role sources here are real implementations backed by in-memory data.

use async_trait::async_trait;
use library_access::config::BackendConfig;
use library_access::{
    AccessError, CapabilityTable, Principal, Result, RoleResolver, RoleSet, RoleSource,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Answers from a fixed principal-to-roles map; unknown principals hold no roles
#[derive(Debug, Default)]
pub struct StaticRoleSource {
    roles: HashMap<String, RoleSet>,
    calls: AtomicUsize,
}

impl StaticRoleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roles(mut self, principal: &str, names: &[&str]) -> Self {
        self.roles.insert(
            principal.to_string(),
            RoleSet::from_names(names.iter().copied()),
        );
        self
    }

    /// Number of fetches served
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoleSource for StaticRoleSource {
    async fn fetch_roles(&self, principal: &Principal) -> Result<RoleSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .roles
            .get(principal.id.as_str())
            .cloned()
            .unwrap_or_default())
    }
}

/// Rejects every fetch with a network error
#[derive(Debug, Clone)]
pub struct FailingRoleSource {
    message: String,
}

impl FailingRoleSource {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl RoleSource for FailingRoleSource {
    async fn fetch_roles(&self, _principal: &Principal) -> Result<RoleSet> {
        Err(AccessError::network(self.message.clone()))
    }
}

pub fn principal(id: &str) -> Principal {
    Principal::new(id)
}

/// Resolver with the default capability table
pub fn resolver(source: Arc<dyn RoleSource>) -> Arc<RoleResolver> {
    Arc::new(RoleResolver::new(source, CapabilityTable::default()))
}

/// Backend config pointing at a mock server, authenticated with an API key
pub fn backend_config(base_url: &str) -> BackendConfig {
    BackendConfig {
        base_url: base_url.to_string(),
        timeout_secs: 1,
        api_key: Some("test-key".to_string()),
        api_secret: Some("test-secret".to_string()),
        ..BackendConfig::default()
    }
}
