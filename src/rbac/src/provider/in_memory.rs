//! Static role catalog

use super::{parse_role_definitions, RoleProvider};
use crate::error::Result;
use crate::types::{Identity, Role, RoleSet};
use serde_json::Value;
use std::sync::Arc;

/// Provider holding a fixed set of roles
///
/// Every identity gets the whole set, which suits guest-only or flat
/// deployments. The set also serves name lookups for hierarchy expansion.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleProvider {
    roles: RoleSet,
}

impl InMemoryRoleProvider {
    /// Registry kind name
    pub const KIND: &'static str = "InMemoryRoleProvider";

    /// Create a provider from role definitions
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
        }
    }

    /// Create a provider from registry constructor arguments
    pub fn from_args(args: &[Value]) -> Result<Self> {
        Ok(Self {
            roles: parse_role_definitions(Self::KIND, args)?,
        })
    }

    /// Number of roles held
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether the provider holds no roles
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl RoleProvider for InMemoryRoleProvider {
    fn roles_for(&self, _identity: &dyn Identity) -> RoleSet {
        self.roles.clone()
    }

    fn role(&self, name: &str) -> Option<Arc<Role>> {
        self.roles.get(name).cloned()
    }

    fn catalog(&self) -> Option<RoleSet> {
        Some(self.roles.clone())
    }
}
