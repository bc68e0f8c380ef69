//! Route gating
//!
//! [`AccessRequirements`] holds the one access predicate shared by route gates
//! and the navigation filter. [`RouteGate`] turns it into a render decision,
//! and [`AuthGate`] guards routes that need a signed-in principal at all.

use crate::auth::AuthState;
use crate::config::{AccessConfig, DenialMode, default_fallback_message, default_fallback_path};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::resolver::RoleState;
use super::types::{CapabilityFlags, RoleName, RoleSet};

/// Constraints a principal must meet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequirements {
    /// Any-of role match; empty means no role constraint
    #[serde(default)]
    pub required_roles: Vec<RoleName>,
    #[serde(default)]
    pub require_librarian: bool,
    #[serde(default)]
    pub require_member: bool,
    #[serde(default)]
    pub require_admin: bool,
}

impl AccessRequirements {
    /// No constraints: any settled principal passes
    pub fn none() -> Self {
        Self::default()
    }

    pub fn librarian() -> Self {
        Self {
            require_librarian: true,
            ..Self::default()
        }
    }

    pub fn member() -> Self {
        Self {
            require_member: true,
            ..Self::default()
        }
    }

    pub fn admin() -> Self {
        Self {
            require_admin: true,
            ..Self::default()
        }
    }

    pub fn with_roles<I: IntoIterator<Item = RoleName>>(mut self, roles: I) -> Self {
        self.required_roles.extend(roles);
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.required_roles.is_empty()
            && !self.require_librarian
            && !self.require_member
            && !self.require_admin
    }

    /// The access predicate, evaluated against settled roles and flags
    pub fn satisfied_by(&self, roles: &RoleSet, flags: CapabilityFlags) -> bool {
        self.check(roles, flags).is_ok()
    }

    /// Like [`satisfied_by`](Self::satisfied_by) but reports the first unmet constraint
    pub fn check(&self, roles: &RoleSet, flags: CapabilityFlags) -> Result<(), DenialReason> {
        if !self.required_roles.is_empty() && !roles.contains_any(&self.required_roles) {
            return Err(DenialReason::MissingRole {
                required: self.required_roles.clone(),
            });
        }
        if self.require_librarian && !flags.is_librarian {
            return Err(DenialReason::NotLibrarian);
        }
        if self.require_member && !flags.is_member {
            return Err(DenialReason::NotMember);
        }
        if self.require_admin && !flags.is_admin {
            return Err(DenialReason::NotAdmin);
        }
        Ok(())
    }
}

/// Why access was refused; travels with the redirect for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DenialReason {
    MissingRole { required: Vec<RoleName> },
    NotLibrarian,
    NotMember,
    NotAdmin,
    Unauthenticated,
    UnknownRoute,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::MissingRole { required } => {
                let names: Vec<&str> = required.iter().map(RoleName::as_str).collect();
                write!(f, "requires one of the roles: {}", names.join(", "))
            }
            DenialReason::NotLibrarian => f.write_str("requires librarian access"),
            DenialReason::NotMember => f.write_str("requires member access"),
            DenialReason::NotAdmin => f.write_str("requires admin access"),
            DenialReason::Unauthenticated => f.write_str("sign-in required"),
            DenialReason::UnknownRoute => f.write_str("no such page"),
        }
    }
}

/// Client-side navigation instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub to: String,
    /// Replace the current history entry instead of pushing
    pub replace: bool,
    pub reason: Option<DenialReason>,
}

impl Redirect {
    pub fn replace(to: impl Into<String>, reason: Option<DenialReason>) -> Self {
        Self {
            to: to.into(),
            replace: true,
            reason,
        }
    }
}

/// What a gated view should render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GateOutcome {
    /// Neutral loading indicator
    Loading,
    /// Error indicator; `fallback` is where the view may send the principal
    Error { message: String, fallback: Redirect },
    /// Render the wrapped view
    Content,
    Redirect(Redirect),
    /// Render `message` in place of the view
    Forbidden {
        message: String,
        reason: DenialReason,
    },
}

impl GateOutcome {
    pub fn is_content(&self) -> bool {
        matches!(self, GateOutcome::Content)
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            GateOutcome::Redirect(redirect) => Some(redirect),
            _ => None,
        }
    }
}

/// Guards a view by capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGate {
    requirements: AccessRequirements,
    fallback_path: String,
    fallback_message: String,
    mode: DenialMode,
}

impl RouteGate {
    pub fn new(requirements: AccessRequirements) -> Self {
        Self {
            requirements,
            fallback_path: default_fallback_path(),
            fallback_message: default_fallback_message(),
            mode: DenialMode::Redirect,
        }
    }

    /// Pass-through for any settled principal
    pub fn authenticated() -> Self {
        Self::new(AccessRequirements::none())
    }

    pub fn librarian_only() -> Self {
        Self::new(AccessRequirements::librarian())
    }

    pub fn member_only() -> Self {
        Self::new(AccessRequirements::member())
    }

    pub fn admin_only() -> Self {
        Self::new(AccessRequirements::admin())
    }

    pub fn with_fallback_path(mut self, path: impl Into<String>) -> Self {
        self.fallback_path = path.into();
        self
    }

    pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    pub fn with_mode(mut self, mode: DenialMode) -> Self {
        self.mode = mode;
        self
    }

    /// Apply the configured fallback path, message and denial mode
    pub fn configured(self, config: &AccessConfig) -> Self {
        self.with_fallback_path(config.fallback_path.clone())
            .with_fallback_message(config.fallback_message.clone())
            .with_mode(config.denial_mode)
    }

    pub fn requirements(&self) -> &AccessRequirements {
        &self.requirements
    }

    pub fn fallback_path(&self) -> &str {
        &self.fallback_path
    }

    pub fn fallback_message(&self) -> &str {
        &self.fallback_message
    }

    /// Fail-closed access check: false while loading or after a failed fetch
    pub fn has_access(&self, state: &RoleState) -> bool {
        state.is_settled_ok() && self.requirements.satisfied_by(&state.roles, state.flags)
    }

    /// Decide what to render for the current role state
    pub fn evaluate(&self, state: &RoleState) -> GateOutcome {
        if state.is_loading {
            return GateOutcome::Loading;
        }
        if let Some(message) = &state.error {
            return GateOutcome::Error {
                message: message.clone(),
                fallback: Redirect::replace(self.fallback_path.clone(), None),
            };
        }

        match self.requirements.check(&state.roles, state.flags) {
            Ok(()) => GateOutcome::Content,
            Err(reason) => {
                debug!(
                    principal = ?state.principal,
                    reason = %reason,
                    fallback = %self.fallback_path,
                    "Route access denied"
                );
                match self.mode {
                    DenialMode::Redirect => GateOutcome::Redirect(Redirect::replace(
                        self.fallback_path.clone(),
                        Some(reason),
                    )),
                    DenialMode::Forbidden => GateOutcome::Forbidden {
                        message: self.fallback_message.clone(),
                        reason,
                    },
                }
            }
        }
    }
}

impl Default for RouteGate {
    fn default() -> Self {
        Self::authenticated()
    }
}

/// Requires a signed-in principal before any role check happens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGate {
    login_path: String,
}

impl AuthGate {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// `Content` means the principal may proceed to the route's own gate
    pub fn evaluate(&self, auth: &AuthState) -> GateOutcome {
        if auth.is_loading {
            return GateOutcome::Loading;
        }
        if auth.principal.is_none() {
            return GateOutcome::Redirect(Redirect::replace(
                self.login_path.clone(),
                Some(DenialReason::Unauthenticated),
            ));
        }
        GateOutcome::Content
    }
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new(crate::config::default_login_path())
    }
}
