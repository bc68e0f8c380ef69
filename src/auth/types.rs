//! Principal and authentication state types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an authenticated principal (the backend user id, usually an email)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrincipalId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The authenticated actor.
///
/// The identity token is opaque and owned by the auth collaborator.
#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: PrincipalId,
    token: Option<String>,
}

impl Principal {
    pub fn new(id: impl Into<PrincipalId>) -> Self {
        Self {
            id: id.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("id", &self.id)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Snapshot of the auth collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    /// Signed-in principal, if any
    pub principal: Option<Principal>,
    /// Whether the auth collaborator is still establishing the session
    pub is_loading: bool,
}

impl AuthState {
    pub fn loading() -> Self {
        Self {
            principal: None,
            is_loading: true,
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
            is_loading: false,
        }
    }

    /// The principal, but only once auth has settled
    pub fn settled_principal(&self) -> Option<&Principal> {
        if self.is_loading {
            None
        } else {
            self.principal.as_ref()
        }
    }
}
