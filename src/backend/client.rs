//! HTTP implementation of the remote call interface

use crate::config::BackendConfig;
use crate::utils::error::{AccessError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, COOKIE, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::RemoteCall;

/// Calls whitelisted backend methods at `POST {base_url}/api/method/{endpoint}`.
///
/// Credentials are attached to every request as default headers: API key
/// credentials as `Authorization: token key:secret`, or a browser session as
/// the `sid` cookie.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| AccessError::config(format!("Invalid backend URL: {}", e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(credential_headers(config)?)
            .build()
            .map_err(|e| AccessError::config(format!("Failed to create HTTP client: {}", e)))?;

        info!(base_url = %base_url, "Backend client created");
        Ok(Self { http, base_url })
    }

    /// Absolute URL of a backend method
    pub fn method_url(&self, endpoint: &str) -> Result<Url> {
        self.base_url
            .join(&format!("api/method/{}", endpoint))
            .map_err(|e| AccessError::config(format!("Invalid endpoint {}: {}", endpoint, e)))
    }
}

#[async_trait]
impl RemoteCall for BackendClient {
    async fn call(&self, endpoint: &str, params: Value) -> Result<Value> {
        let url = self.method_url(endpoint)?;
        debug!(endpoint, "Calling backend method");

        let response = self
            .http
            .post(url)
            .json(&params)
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(endpoint, e))?;
        let payload: Option<Value> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let message = payload
                .as_ref()
                .and_then(error_message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            warn!(endpoint, status = status.as_u16(), error = %message, "Backend call failed");
            return Err(AccessError::remote(endpoint, message));
        }

        match payload {
            Some(mut envelope) => Ok(envelope
                .get_mut("message")
                .map(Value::take)
                .unwrap_or(Value::Null)),
            None if body.trim().is_empty() => Ok(Value::Null),
            None => Err(AccessError::parsing(format!(
                "{} returned a non-JSON body",
                endpoint
            ))),
        }
    }
}

fn credential_headers(config: &BackendConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let sensitive = |value: String| -> Result<HeaderValue> {
        let mut header = HeaderValue::from_str(&value)
            .map_err(|_| AccessError::config("Backend credentials contain invalid characters"))?;
        header.set_sensitive(true);
        Ok(header)
    };

    if let (Some(key), Some(secret)) = (&config.api_key, &config.api_secret) {
        headers.insert(AUTHORIZATION, sensitive(format!("token {}:{}", key, secret))?);
    } else if let Some(sid) = &config.session_id {
        headers.insert(COOKIE, sensitive(format!("sid={}", sid))?);
    }

    Ok(headers)
}

fn transport_error(endpoint: &str, error: reqwest::Error) -> AccessError {
    if error.is_timeout() {
        AccessError::timeout(format!("request to {} timed out", endpoint))
    } else {
        AccessError::network(error.to_string())
    }
}

/// Pull a readable message out of a backend error body
fn error_message(body: &Value) -> Option<String> {
    for field in ["message", "exception", "exc_type"] {
        if let Some(text) = body.get(field).and_then(Value::as_str) {
            if !text.trim().is_empty() {
                return Some(text.to_string());
            }
        }
    }

    // `_server_messages` is a JSON string holding a list of JSON-encoded objects
    let encoded = body.get("_server_messages").and_then(Value::as_str)?;
    let messages: Vec<String> = serde_json::from_str(encoded).ok()?;
    messages.iter().find_map(|raw| {
        let inner: Value = serde_json::from_str(raw).ok()?;
        inner
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
    })
}
