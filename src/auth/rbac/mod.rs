//! Role-Based Access Control (RBAC)
//!
//! Roles come from the backend through [`RoleResolver`], are projected onto
//! capability flags by a [`CapabilityTable`], and drive [`RouteGate`] and
//! [`NavigationFilter`] decisions.

mod gate;
mod navigation;
mod resolver;
mod table;
mod types;

pub use gate::{AccessRequirements, AuthGate, DenialReason, GateOutcome, Redirect, RouteGate};
pub use navigation::{NavGroup, NavigationFilter, NavigationItem, NavigationView};
pub use resolver::{RoleResolver, RoleState};
pub use table::{CapabilityTable, roles};
pub use types::{Capability, CapabilityFlags, RoleName, RoleSet};
