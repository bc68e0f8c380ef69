//! Role-to-capability mapping

use crate::config::CapabilityRolesConfig;
use crate::utils::error::{AccessError, Result};
use tracing::debug;

use super::types::{Capability, CapabilityFlags, RoleName, RoleSet};

/// Well-known role names issued by the library backend
pub mod roles {
    pub const LIBRARY_MEMBER: &str = "Library Member";
    pub const LIBRARIAN: &str = "Librarian";
    pub const LIBRARY_MANAGER: &str = "Library Manager";
    pub const SYSTEM_MANAGER: &str = "System Manager";
}

/// The single declared mapping from role names to capability flags.
///
/// A flag is set when the principal holds any role listed for it, so
/// derivation is monotonic: adding roles never clears a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityTable {
    member: RoleSet,
    librarian: RoleSet,
    admin: RoleSet,
}

impl CapabilityTable {
    pub fn new(member: RoleSet, librarian: RoleSet, admin: RoleSet) -> Self {
        Self {
            member,
            librarian,
            admin,
        }
    }

    /// Build the table from configuration, rejecting blank role names
    pub fn from_config(config: &CapabilityRolesConfig) -> Result<Self> {
        let parse = |name: &str, roles: &[String]| -> Result<RoleSet> {
            roles
                .iter()
                .map(|role| {
                    RoleName::new(role.as_str()).map_err(|_| {
                        AccessError::config(format!("{} contains a blank role name", name))
                    })
                })
                .collect()
        };

        let table = Self {
            member: parse("member_roles", &config.member_roles)?,
            librarian: parse("librarian_roles", &config.librarian_roles)?,
            admin: parse("admin_roles", &config.admin_roles)?,
        };
        debug!(
            member = table.member.len(),
            librarian = table.librarian.len(),
            admin = table.admin.len(),
            "Capability table loaded"
        );
        Ok(table)
    }

    /// Roles granting `capability`
    pub fn roles_for(&self, capability: Capability) -> &RoleSet {
        match capability {
            Capability::Member => &self.member,
            Capability::Librarian => &self.librarian,
            Capability::Admin => &self.admin,
        }
    }

    pub fn grants(&self, roles: &RoleSet, capability: Capability) -> bool {
        roles.intersects(self.roles_for(capability))
    }

    /// Derive flags from a role set. Pure: same roles, same flags.
    pub fn derive(&self, roles: &RoleSet) -> CapabilityFlags {
        CapabilityFlags {
            is_member: self.grants(roles, Capability::Member),
            is_librarian: self.grants(roles, Capability::Librarian),
            is_admin: self.grants(roles, Capability::Admin),
        }
    }
}

impl Default for CapabilityTable {
    fn default() -> Self {
        Self {
            member: RoleSet::from_names([
                roles::LIBRARY_MEMBER,
                roles::LIBRARIAN,
                roles::LIBRARY_MANAGER,
                roles::SYSTEM_MANAGER,
            ]),
            librarian: RoleSet::from_names([
                roles::LIBRARIAN,
                roles::LIBRARY_MANAGER,
                roles::SYSTEM_MANAGER,
            ]),
            admin: RoleSet::from_names([roles::SYSTEM_MANAGER]),
        }
    }
}
