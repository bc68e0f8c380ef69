//! # library-access
//!
//! Role-based access control for the library management front end.
//!
//! The backend owns every business rule; this crate decides what the current
//! principal may see:
//!
//! - **Role resolution**: [`RoleResolver`] fetches the principal's role names
//!   once per sign-in and derives the `member` / `librarian` / `admin`
//!   capability flags from a single [`CapabilityTable`].
//! - **Route gating**: [`RouteGate`] turns role state into a render decision
//!   (loading, error, content, redirect or forbidden) and [`RouteTable`] wires
//!   gates to the application's paths.
//! - **Navigation**: [`NavigationFilter`] reduces the static menu to the items
//!   the principal may open, grouped for display.
//!
//! Loading and failed resolutions always deny.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use library_access::{
//!     BackendClient, BackendRoleSource, CapabilityTable, Config, NavigationFilter,
//!     Principal, RoleResolver, Session,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/library-access.yaml").await?;
//!     let client = Arc::new(BackendClient::new(config.backend())?);
//!     let source = Arc::new(BackendRoleSource::from_config(client, config.backend()));
//!     let table = CapabilityTable::from_config(&config.access().capabilities)?;
//!     let resolver = Arc::new(RoleResolver::new(source, table));
//!
//!     let session = Session::start(Principal::new("member@example.org"), resolver).await;
//!     let menu = NavigationFilter::library().view(&session.roles());
//!     for item in menu.all() {
//!         println!("{} -> {}", item.label, item.path);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod auth;
pub mod backend;
pub mod config;
pub mod routes;
pub mod utils;

pub use auth::rbac::{
    AccessRequirements, AuthGate, Capability, CapabilityFlags, CapabilityTable, DenialReason,
    GateOutcome, NavGroup, NavigationFilter, NavigationItem, NavigationView, Redirect, RoleName,
    RoleResolver, RoleSet, RoleState, RouteGate,
};
pub use auth::{AuthState, Principal, PrincipalId, Session};
pub use backend::{BackendClient, BackendRoleSource, RemoteCall, RoleSource};
pub use config::Config;
pub use routes::{RouteAccess, RouteDecision, RouteTable};
pub use utils::error::{AccessError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
