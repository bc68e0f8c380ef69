//! Role resolution for the current principal

use crate::auth::{AuthState, Principal, PrincipalId};
use crate::backend::RoleSource;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::table::CapabilityTable;
use super::types::{CapabilityFlags, RoleSet};

/// What the resolver currently knows about the principal's roles.
///
/// Loading and failed states always carry an empty role set and
/// [`CapabilityFlags::DENIED`], so consumers fail closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleState {
    /// Principal the state belongs to; `None` when idle
    pub principal: Option<PrincipalId>,
    pub roles: RoleSet,
    pub flags: CapabilityFlags,
    /// A role fetch is in flight
    pub is_loading: bool,
    /// Human-readable message of the last failed fetch
    pub error: Option<String>,
    /// When the roles were settled
    pub resolved_at: Option<DateTime<Utc>>,
}

impl RoleState {
    /// No principal, or auth still settling
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn loading(principal: PrincipalId) -> Self {
        Self {
            principal: Some(principal),
            is_loading: true,
            ..Self::default()
        }
    }

    pub fn resolved(principal: PrincipalId, roles: RoleSet, table: &CapabilityTable) -> Self {
        let flags = table.derive(&roles);
        Self {
            principal: Some(principal),
            roles,
            flags,
            is_loading: false,
            error: None,
            resolved_at: Some(Utc::now()),
        }
    }

    pub fn failed(principal: PrincipalId, message: impl Into<String>) -> Self {
        Self {
            principal: Some(principal),
            error: Some(message.into()),
            resolved_at: Some(Utc::now()),
            ..Self::default()
        }
    }

    /// Neither loading nor failed
    pub fn is_settled_ok(&self) -> bool {
        !self.is_loading && self.error.is_none()
    }

    pub fn is_member(&self) -> bool {
        self.flags.is_member
    }

    pub fn is_librarian(&self) -> bool {
        self.flags.is_librarian
    }

    pub fn is_admin(&self) -> bool {
        self.flags.is_admin
    }
}

#[derive(Debug, Default)]
struct FetchKey {
    principal: Option<Principal>,
    generation: u64,
}

/// Fetches the current principal's roles once per principal and publishes
/// [`RoleState`] snapshots to any number of observers.
///
/// Every fetch is tagged with the principal and a generation number taken at
/// request time. A response that arrives after the principal changed (or
/// after a reset or newer fetch) is dropped instead of overwriting newer state.
pub struct RoleResolver {
    source: Arc<dyn RoleSource>,
    table: CapabilityTable,
    state: watch::Sender<RoleState>,
    current: Mutex<FetchKey>,
}

impl RoleResolver {
    pub fn new(source: Arc<dyn RoleSource>, table: CapabilityTable) -> Self {
        let (state, _) = watch::channel(RoleState::idle());
        Self {
            source,
            table,
            state,
            current: Mutex::new(FetchKey::default()),
        }
    }

    pub fn table(&self) -> &CapabilityTable {
        &self.table
    }

    /// Observe state changes
    pub fn subscribe(&self) -> watch::Receiver<RoleState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn current(&self) -> RoleState {
        self.state.borrow().clone()
    }

    /// React to a change reported by the auth collaborator.
    ///
    /// Starts a fetch when a new principal becomes available. A principal that
    /// is already loading or settled is left alone; failures are not retried.
    pub async fn sync(&self, auth: &AuthState) -> RoleState {
        match auth.settled_principal() {
            Some(principal) => self.run(principal.clone(), false).await,
            None => {
                self.reset();
                self.current()
            }
        }
    }

    /// Re-fetch roles for the current principal
    pub async fn refresh(&self) -> RoleState {
        let principal = self.current.lock().principal.clone();
        match principal {
            Some(principal) => self.run(principal, true).await,
            None => self.current(),
        }
    }

    /// Forget the principal (sign-out). Any in-flight fetch becomes stale.
    pub fn reset(&self) {
        let mut key = self.current.lock();
        key.generation += 1;
        key.principal = None;
        self.state.send_if_modified(|state| {
            if *state == RoleState::idle() {
                false
            } else {
                *state = RoleState::idle();
                true
            }
        });
    }

    async fn run(&self, principal: Principal, force: bool) -> RoleState {
        let generation = {
            let mut key = self.current.lock();
            let same_principal = key
                .principal
                .as_ref()
                .is_some_and(|current| current.id == principal.id);
            if same_principal && !force {
                return self.state.borrow().clone();
            }
            key.generation += 1;
            key.principal = Some(principal.clone());
            self.state
                .send_replace(RoleState::loading(principal.id.clone()));
            key.generation
        };

        debug!(principal = %principal.id, generation, "Fetching roles");
        let next = match self.source.fetch_roles(&principal).await {
            Ok(roles) => {
                let state = RoleState::resolved(principal.id.clone(), roles, &self.table);
                info!(
                    principal = %principal.id,
                    roles = state.roles.len(),
                    member = state.flags.is_member,
                    librarian = state.flags.is_librarian,
                    admin = state.flags.is_admin,
                    "Roles resolved"
                );
                debug!(principal = %principal.id, roles = ?state.roles, "Role names");
                state
            }
            Err(e) => {
                warn!(principal = %principal.id, error = %e, "Failed to fetch roles");
                RoleState::failed(principal.id.clone(), e.user_message())
            }
        };

        let key = self.current.lock();
        if key.generation != generation {
            debug!(
                principal = %principal.id,
                generation,
                current = key.generation,
                "Discarding stale role response"
            );
            return self.state.borrow().clone();
        }
        self.state.send_replace(next.clone());
        next
    }
}

impl std::fmt::Debug for RoleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleResolver")
            .field("table", &self.table)
            .field("state", &*self.state.borrow())
            .finish()
    }
}
