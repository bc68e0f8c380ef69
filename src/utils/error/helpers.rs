//! Helper functions for creating specific error types

use super::types::AccessError;

impl AccessError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth(message.into())
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn remote<E: Into<String>, S: Into<String>>(endpoint: E, message: S) -> Self {
        Self::Remote {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    /// The human-readable message without the category prefix.
    ///
    /// This is what a failed role fetch exposes to views, so a rejected call
    /// carrying "network timeout" is shown as exactly that.
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(msg)
            | Self::Auth(msg)
            | Self::Network(msg)
            | Self::Timeout(msg)
            | Self::Validation(msg)
            | Self::Parsing(msg)
            | Self::NotFound(msg) => msg.clone(),
            Self::Remote { message, .. } => message.clone(),
            Self::HttpClient(e) => e.to_string(),
            Self::Serialization(e) => e.to_string(),
            Self::Yaml(e) => e.to_string(),
            Self::Io(e) => e.to_string(),
        }
    }

    /// Whether the error came from the transport rather than the backend
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::HttpClient(_)
        )
    }
}
