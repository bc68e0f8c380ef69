//! Access control configuration

use super::*;
use serde::{Deserialize, Serialize};

/// What a route gate does when access is denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DenialMode {
    /// Navigate to the fallback path, replacing the history entry
    #[default]
    Redirect,
    /// Render the fallback message in place
    Forbidden,
}

/// Role names granting each capability flag.
///
/// The literal names are owned by the backend; these lists must agree with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityRolesConfig {
    #[serde(default = "default_librarian_roles")]
    pub librarian_roles: Vec<String>,
    #[serde(default = "default_member_roles")]
    pub member_roles: Vec<String>,
    #[serde(default = "default_admin_roles")]
    pub admin_roles: Vec<String>,
}

impl Default for CapabilityRolesConfig {
    fn default() -> Self {
        Self {
            librarian_roles: default_librarian_roles(),
            member_roles: default_member_roles(),
            admin_roles: default_admin_roles(),
        }
    }
}

impl CapabilityRolesConfig {
    /// Merge capability tables (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        if other.librarian_roles != default_librarian_roles() {
            self.librarian_roles = other.librarian_roles;
        }
        if other.member_roles != default_member_roles() {
            self.member_roles = other.member_roles;
        }
        if other.admin_roles != default_admin_roles() {
            self.admin_roles = other.admin_roles;
        }
        self
    }
}

/// Route gating and navigation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Role-to-capability mapping
    #[serde(default)]
    pub capabilities: CapabilityRolesConfig,
    /// Redirect target for denied routes
    #[serde(default = "default_fallback_path")]
    pub fallback_path: String,
    /// Redirect target when no principal is signed in
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default)]
    pub denial_mode: DenialMode,
    /// Shown in place when `denial_mode` is `forbidden`
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            capabilities: CapabilityRolesConfig::default(),
            fallback_path: default_fallback_path(),
            login_path: default_login_path(),
            denial_mode: DenialMode::default(),
            fallback_message: default_fallback_message(),
        }
    }
}

impl AccessConfig {
    /// Merge access configurations (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.capabilities = self.capabilities.merge(other.capabilities);
        if other.fallback_path != default_fallback_path() {
            self.fallback_path = other.fallback_path;
        }
        if other.login_path != default_login_path() {
            self.login_path = other.login_path;
        }
        if other.denial_mode != DenialMode::default() {
            self.denial_mode = other.denial_mode;
        }
        if other.fallback_message != default_fallback_message() {
            self.fallback_message = other.fallback_message;
        }
        self
    }
}
