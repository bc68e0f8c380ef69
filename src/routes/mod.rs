//! Application route table
//!
//! Maps location paths to their guards: public routes render directly,
//! authenticated routes pass the [`AuthGate`] and then their own [`RouteGate`].

mod pattern;

pub use pattern::{RouteMatch, RoutePattern};

use crate::auth::AuthState;
use crate::auth::rbac::{AuthGate, DenialReason, GateOutcome, Redirect, RoleState, RouteGate};
use crate::config::AccessConfig;
use crate::utils::error::Result;
use tracing::debug;

/// Who may open a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    /// Requires a signed-in principal, then the gate's requirements
    Authenticated(RouteGate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    pub pattern: RoutePattern,
    pub access: RouteAccess,
}

/// Result of evaluating a location against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecision {
    /// `None` when no route matched
    pub matched: Option<RouteMatch>,
    pub outcome: GateOutcome,
}

/// Ordered routes; the first matching pattern wins
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDefinition>,
    auth_gate: AuthGate,
}

impl RouteTable {
    pub fn new(auth_gate: AuthGate) -> Self {
        Self {
            routes: Vec::new(),
            auth_gate,
        }
    }

    pub fn route(mut self, pattern: &str, access: RouteAccess) -> Result<Self> {
        self.routes.push(RouteDefinition {
            pattern: RoutePattern::parse(pattern)?,
            access,
        });
        Ok(self)
    }

    /// The library application's routes
    pub fn library(config: &AccessConfig) -> Result<Self> {
        let gate =
            |route_gate: RouteGate| RouteAccess::Authenticated(route_gate.configured(config));
        let authenticated = || gate(RouteGate::authenticated());
        let librarian = || gate(RouteGate::librarian_only());
        let member = || gate(RouteGate::member_only());
        let admin = || gate(RouteGate::admin_only());

        Self::new(AuthGate::new(config.login_path.clone()))
            .route(&config.login_path, RouteAccess::Public)?
            .route("/", authenticated())?
            .route("/books", authenticated())?
            .route("/books/new", librarian())?
            .route("/books/edit/:name", librarian())?
            .route("/members", librarian())?
            .route("/members/new", librarian())?
            .route("/members/edit/:name", librarian())?
            .route("/loans", librarian())?
            .route("/loans/new", librarian())?
            .route("/reservations", authenticated())?
            .route("/my-loans", member())?
            .route("/my-reservations", member())?
            .route("/create-test-users", admin())
    }

    pub fn routes(&self) -> &[RouteDefinition] {
        &self.routes
    }

    pub fn auth_gate(&self) -> &AuthGate {
        &self.auth_gate
    }

    /// First route matching `path`
    pub fn resolve(&self, path: &str) -> Option<(&RouteDefinition, RouteMatch)> {
        self.routes
            .iter()
            .find_map(|route| route.pattern.matches(path).map(|matched| (route, matched)))
    }

    /// Decide what to render at `path`
    pub fn evaluate(&self, path: &str, auth: &AuthState, roles: &RoleState) -> RouteDecision {
        let Some((route, matched)) = self.resolve(path) else {
            debug!(path, "No route matched");
            return RouteDecision {
                matched: None,
                outcome: GateOutcome::Redirect(Redirect::replace(
                    self.auth_gate.login_path(),
                    Some(DenialReason::UnknownRoute),
                )),
            };
        };

        let outcome = match &route.access {
            RouteAccess::Public => GateOutcome::Content,
            RouteAccess::Authenticated(gate) => match self.auth_gate.evaluate(auth) {
                GateOutcome::Content => {
                    let principal = auth.principal.as_ref().map(|p| &p.id);
                    if roles.principal.as_ref() != principal {
                        // The resolver has not caught up with this principal yet
                        GateOutcome::Loading
                    } else {
                        gate.evaluate(roles)
                    }
                }
                denied => denied,
            },
        };

        RouteDecision {
            matched: Some(matched),
            outcome,
        }
    }
}
