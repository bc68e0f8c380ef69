//! Backend configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;
use url::Url;

impl Validate for BackendConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating backend configuration");

        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("base_url has invalid URL format: {}", e))?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(format!(
                    "base_url must use http:// or https:// scheme, got: {}",
                    scheme
                ));
            }
        }
        if url.host_str().is_none() {
            return Err("base_url must have a valid host".to_string());
        }

        let endpoint = self.roles_endpoint.trim();
        if endpoint.is_empty() {
            return Err("roles_endpoint cannot be empty".to_string());
        }
        if endpoint.contains('/') || endpoint.contains(char::is_whitespace) {
            return Err(format!(
                "roles_endpoint must be a dotted method path, got: {}",
                self.roles_endpoint
            ));
        }

        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err("timeout_secs must be between 1 and 300".to_string());
        }

        if self.api_key.is_some() != self.api_secret.is_some() {
            return Err("api_key and api_secret must be configured together".to_string());
        }
        if self.has_token_credentials() && self.session_id.is_some() {
            return Err("configure either api_key/api_secret or session_id, not both".to_string());
        }

        Ok(())
    }
}
