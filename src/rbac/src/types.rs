//! Core role types

use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// Unique role identifier
pub type RoleName = String;

/// Unique permission identifier
pub type PermissionId = String;

/// Named node in the role hierarchy
///
/// A role grants its own permissions plus those of every role reachable
/// through `parents`. Roles are immutable once a provider has built them;
/// two roles are the same role when their names are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Role {
    /// Role name (e.g., "editor")
    pub name: RoleName,

    /// Names of the roles this role inherits from
    #[serde(default)]
    pub parents: BTreeSet<RoleName>,

    /// Permissions granted directly by this role
    #[serde(default)]
    pub permissions: BTreeSet<PermissionId>,
}

impl Role {
    /// Create a role with no parents and no permissions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parents: BTreeSet::new(),
            permissions: BTreeSet::new(),
        }
    }

    /// Add a parent role reference
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parents.insert(parent.into());
        self
    }

    /// Add a directly-granted permission
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    /// Whether this role grants `permission` directly (parents not consulted)
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

/// Set of roles keyed by name
///
/// Inserting a role whose name is already present keeps the first one.
/// Iteration is ordered by role name, so everything derived from a set
/// (closures, decisions, logs) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    roles: BTreeMap<RoleName, Arc<Role>>,
}

impl RoleSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a role, returning `false` if a role with that name was already present
    pub fn insert(&mut self, role: Arc<Role>) -> bool {
        match self.roles.entry(role.name.clone()) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(role);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Whether a role with this name is in the set
    pub fn contains(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    /// Look up a role by name
    pub fn get(&self, name: &str) -> Option<&Arc<Role>> {
        self.roles.get(name)
    }

    /// Role names in ascending order
    pub fn names(&self) -> Vec<RoleName> {
        self.roles.keys().cloned().collect()
    }

    /// Iterate over the roles in name order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Role>> {
        self.roles.values()
    }

    /// Number of roles
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Extend<Arc<Role>> for RoleSet {
    fn extend<I: IntoIterator<Item = Arc<Role>>>(&mut self, iter: I) {
        for role in iter {
            self.insert(role);
        }
    }
}

impl FromIterator<Arc<Role>> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Arc<Role>>>(iter: I) -> Self {
        let mut set = RoleSet::new();
        set.extend(iter);
        set
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().map(Arc::new).collect()
    }
}

impl<'a> IntoIterator for &'a RoleSet {
    type Item = &'a Arc<Role>;
    type IntoIter = btree_map::Values<'a, RoleName, Arc<Role>>;

    fn into_iter(self) -> Self::IntoIter {
        self.roles.values()
    }
}

/// An authenticated caller
///
/// The core only needs the names of the roles directly assigned to the
/// identity. "No identity" is expressed as `None` by callers, never as an
/// identity with zero roles.
pub trait Identity: Send + Sync {
    /// Names of the roles directly assigned to this identity
    fn role_names(&self) -> Vec<RoleName>;
}

/// Identity backed by plain data (user, service account, agent)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Principal identifier (e.g., "user:alice@example.com")
    pub id: String,

    /// Directly-assigned role names
    #[serde(default)]
    pub roles: Vec<RoleName>,

    /// Additional attributes (e.g., department)
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl Principal {
    /// Create a principal with no roles
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roles: Vec::new(),
            attributes: HashMap::new(),
        }
    }

    /// Assign a role name
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// Add an attribute to the principal
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

impl Identity for Principal {
    fn role_names(&self) -> Vec<RoleName> {
        self.roles.clone()
    }
}
