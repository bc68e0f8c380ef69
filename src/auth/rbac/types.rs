//! RBAC type definitions

use crate::utils::error::{AccessError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Role name assigned by the backend, e.g. "Library Member".
///
/// The vocabulary is open-ended; the only guarantee is that the name is not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

impl RoleName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AccessError::validation("role name cannot be blank"));
        }
        if trimmed.len() == name.len() {
            Ok(Self(name))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoleName {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for RoleName {
    type Error = AccessError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<RoleName> for String {
    fn from(role: RoleName) -> Self {
        role.0
    }
}

impl AsRef<str> for RoleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RoleName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Unordered set of role names held by a principal
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<RoleName>);

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw names, skipping blank ones
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            names
                .into_iter()
                .filter_map(|name| RoleName::new(name).ok())
                .collect(),
        )
    }

    pub fn insert(&mut self, role: RoleName) -> bool {
        self.0.insert(role)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Any-of membership test
    pub fn intersects(&self, other: &RoleSet) -> bool {
        !self.0.is_disjoint(&other.0)
    }

    /// Any-of membership test against a borrowed list of names
    pub fn contains_any<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|name| self.contains(name.as_ref()))
    }

    pub fn is_subset(&self, other: &RoleSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn union(&self, other: &RoleSet) -> RoleSet {
        Self(self.0.union(&other.0).cloned().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleName> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<RoleName> for RoleSet {
    fn from_iter<I: IntoIterator<Item = RoleName>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RoleSet {
    type Item = &'a RoleName;
    type IntoIter = std::collections::btree_set::Iter<'a, RoleName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Coarse capabilities derived from a role set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Member,
    Librarian,
    Admin,
}

impl Capability {
    pub const ALL: [Capability; 3] = [Capability::Member, Capability::Librarian, Capability::Admin];
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Member => "member",
            Capability::Librarian => "librarian",
            Capability::Admin => "admin",
        };
        f.write_str(name)
    }
}

/// Read-only projection of a role set onto the three capabilities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilityFlags {
    pub is_member: bool,
    pub is_librarian: bool,
    pub is_admin: bool,
}

impl CapabilityFlags {
    /// Every flag off; the state of loading and failed resolutions
    pub const DENIED: CapabilityFlags = CapabilityFlags {
        is_member: false,
        is_librarian: false,
        is_admin: false,
    };

    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Member => self.is_member,
            Capability::Librarian => self.is_librarian,
            Capability::Admin => self.is_admin,
        }
    }

    /// True when every flag set here is also set in `other`
    pub fn implied_by(&self, other: &CapabilityFlags) -> bool {
        Capability::ALL
            .iter()
            .all(|capability| !self.has(*capability) || other.has(*capability))
    }
}
