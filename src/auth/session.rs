//! Per-sign-in session context
//!
//! A [`Session`] is created when a principal signs in and torn down at
//! sign-out. Views receive it explicitly instead of reading global state.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

use super::rbac::{RoleResolver, RoleState};
use super::{AuthState, Principal};

pub struct Session {
    principal: Principal,
    resolver: Arc<RoleResolver>,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Sign `principal` in and resolve their roles
    pub async fn start(principal: Principal, resolver: Arc<RoleResolver>) -> Self {
        info!(principal = %principal.id, "Session started");
        resolver
            .sync(&AuthState::signed_in(principal.clone()))
            .await;
        Self {
            principal,
            resolver,
            started_at: Utc::now(),
        }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Current role state
    pub fn roles(&self) -> RoleState {
        self.resolver.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<RoleState> {
        self.resolver.subscribe()
    }

    pub fn resolver(&self) -> &Arc<RoleResolver> {
        &self.resolver
    }

    /// Explicitly re-fetch roles, e.g. after an administrator changed them
    pub async fn refresh(&self) -> RoleState {
        self.resolver.refresh().await
    }

    /// Sign out: the resolver returns to idle and in-flight fetches are dropped
    pub fn end(self) {
        info!(principal = %self.principal.id, "Session ended");
        self.resolver.reset();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("principal", &self.principal)
            .field("started_at", &self.started_at)
            .finish()
    }
}
