//! Backend connection configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Connection settings for the document-database backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Site root, e.g. `https://library.example.org`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Remote method that returns `{ roles: [...] }` for the caller
    #[serde(default = "default_roles_endpoint")]
    pub roles_endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// API key, sent with `api_secret` as `Authorization: token key:secret`
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    /// Browser session id, sent as the `sid` cookie
    #[serde(default)]
    pub session_id: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            roles_endpoint: default_roles_endpoint(),
            timeout_secs: default_timeout(),
            api_key: None,
            api_secret: None,
            session_id: None,
        }
    }
}

impl BackendConfig {
    /// Merge backend configurations (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        if other.base_url != default_base_url() {
            self.base_url = other.base_url;
        }
        if other.roles_endpoint != default_roles_endpoint() {
            self.roles_endpoint = other.roles_endpoint;
        }
        if other.timeout_secs != default_timeout() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.api_secret.is_some() {
            self.api_secret = other.api_secret;
        }
        if other.session_id.is_some() {
            self.session_id = other.session_id;
        }
        self
    }

    /// Whether API key credentials are configured
    pub fn has_token_credentials(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some()
    }
}
