//! Role-aware navigation menu

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::gate::AccessRequirements;
use super::resolver::RoleState;
use super::types::{CapabilityFlags, RoleName, RoleSet};

/// Static menu entry, compiled into the program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationItem {
    pub label: &'static str,
    pub path: &'static str,
    /// Any-of role match; empty means no role constraint
    pub roles: &'static [&'static str],
    pub require_librarian: bool,
    pub require_member: bool,
    pub require_admin: bool,
    pub icon: Option<&'static str>,
}

impl NavigationItem {
    const fn new(label: &'static str, path: &'static str) -> Self {
        Self {
            label,
            path,
            roles: &[],
            require_librarian: false,
            require_member: false,
            require_admin: false,
            icon: None,
        }
    }

    const fn librarian(mut self) -> Self {
        self.require_librarian = true;
        self
    }

    const fn member(mut self) -> Self {
        self.require_member = true;
        self
    }

    const fn admin(mut self) -> Self {
        self.require_admin = true;
        self
    }

    const fn icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    /// The library application's menu, in display order
    pub fn library() -> &'static [NavigationItem] {
        LIBRARY_NAVIGATION
    }

    /// The same requirements a [`RouteGate`](super::RouteGate) would check
    pub fn requirements(&self) -> AccessRequirements {
        AccessRequirements {
            required_roles: self
                .roles
                .iter()
                .filter_map(|name| RoleName::new(*name).ok())
                .collect(),
            require_librarian: self.require_librarian,
            require_member: self.require_member,
            require_admin: self.require_admin,
        }
    }

    /// Whether a principal with these settled roles may see the item
    pub fn is_visible(&self, roles: &RoleSet, flags: CapabilityFlags) -> bool {
        self.requirements().satisfied_by(roles, flags)
    }

    /// The display group for this item, by label
    pub fn group(&self) -> Option<NavGroup> {
        NavGroup::for_label(self.label)
    }
}

// Items name capabilities, not role names; the configured table decides who holds them
const LIBRARY_NAVIGATION: &[NavigationItem] = &[
    NavigationItem::new("Dashboard", "/").member().icon("🏠"),
    NavigationItem::new("Books", "/books").member().icon("📚"),
    NavigationItem::new("Add Book", "/books/new").librarian().icon("➕"),
    NavigationItem::new("Members", "/members").librarian().icon("👥"),
    NavigationItem::new("Add Member", "/members/new").librarian().icon("➕"),
    NavigationItem::new("Loans", "/loans").librarian().icon("📖"),
    NavigationItem::new("New Loan", "/loans/new").librarian().icon("➕"),
    NavigationItem::new("My Loans", "/my-loans").member().icon("📚"),
    NavigationItem::new("Reservations", "/reservations").member().icon("⏰"),
    NavigationItem::new("My Reservations", "/my-reservations")
        .member()
        .icon("⏰"),
    NavigationItem::new("Create Test Users", "/create-test-users")
        .admin()
        .icon("👤"),
];

/// Display groups of the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavGroup {
    /// Always-visible top-level links
    Primary,
    Librarian,
    Member,
    Admin,
}

impl NavGroup {
    pub const ALL: [NavGroup; 4] = [
        NavGroup::Primary,
        NavGroup::Librarian,
        NavGroup::Member,
        NavGroup::Admin,
    ];

    /// Fixed label-to-group mapping
    pub fn for_label(label: &str) -> Option<NavGroup> {
        match label {
            "Dashboard" | "Books" => Some(NavGroup::Primary),
            "Add Book" | "Members" | "Add Member" | "Loans" | "New Loan" => {
                Some(NavGroup::Librarian)
            }
            "My Loans" | "Reservations" | "My Reservations" => Some(NavGroup::Member),
            "Create Test Users" => Some(NavGroup::Admin),
            _ => None,
        }
    }

    /// Menu title for grouped (dropdown) rendering
    pub fn title(&self) -> &'static str {
        match self {
            NavGroup::Primary => "Navigation",
            NavGroup::Librarian => "Manage",
            NavGroup::Member => "My Account",
            NavGroup::Admin => "Admin",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Items visible to the principal, grouped for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationView {
    groups: [Vec<NavigationItem>; 4],
    all: Vec<NavigationItem>,
}

impl NavigationView {
    /// Nothing visible
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn group(&self, group: NavGroup) -> &[NavigationItem] {
        &self.groups[group.index()]
    }

    /// Groups with at least one item, in display order
    pub fn non_empty_groups(&self) -> impl Iterator<Item = (NavGroup, &[NavigationItem])> {
        NavGroup::ALL
            .into_iter()
            .map(|group| (group, self.group(group)))
            .filter(|(_, items)| !items.is_empty())
    }

    /// Every visible item in source order, for compact layouts
    pub fn all(&self) -> &[NavigationItem] {
        &self.all
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Whether `item` is the page at `current_path`
    pub fn is_active(item: &NavigationItem, current_path: &str) -> bool {
        item.path == current_path
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewKey {
    roles: RoleSet,
    flags: CapabilityFlags,
    is_loading: bool,
    failed: bool,
}

/// Filters a static menu down to what the principal may see.
///
/// The last view is memoized on `(roles, flags, is_loading, failed)`.
#[derive(Debug)]
pub struct NavigationFilter {
    items: &'static [NavigationItem],
    cache: Mutex<Option<(ViewKey, Arc<NavigationView>)>>,
}

impl NavigationFilter {
    pub fn new(items: &'static [NavigationItem]) -> Self {
        Self {
            items,
            cache: Mutex::new(None),
        }
    }

    pub fn library() -> Self {
        Self::new(NavigationItem::library())
    }

    pub fn items(&self) -> &'static [NavigationItem] {
        self.items
    }

    /// Visible items for `state`; empty while roles are loading or after a failed fetch
    pub fn view(&self, state: &RoleState) -> Arc<NavigationView> {
        let key = ViewKey {
            roles: state.roles.clone(),
            flags: state.flags,
            is_loading: state.is_loading,
            failed: state.error.is_some(),
        };

        let mut cache = self.cache.lock();
        if let Some((cached_key, view)) = cache.as_ref() {
            if *cached_key == key {
                return Arc::clone(view);
            }
        }

        let view = Arc::new(self.compute(&key));
        debug!(
            visible = view.all().len(),
            loading = key.is_loading,
            "Navigation recomputed"
        );
        *cache = Some((key, Arc::clone(&view)));
        view
    }

    fn compute(&self, key: &ViewKey) -> NavigationView {
        if key.is_loading || key.failed {
            return NavigationView::empty();
        }

        let mut view = NavigationView::empty();
        for item in self
            .items
            .iter()
            .filter(|item| item.is_visible(&key.roles, key.flags))
        {
            if let Some(group) = item.group() {
                view.groups[group.index()].push(*item);
            }
            view.all.push(*item);
        }
        view
    }
}

impl Default for NavigationFilter {
    fn default() -> Self {
        Self::library()
    }
}
