//! Provider resolving roles from the identity's own role names

use super::{parse_role_definitions, RoleProvider};
use crate::error::Result;
use crate::types::{Identity, Role, RoleSet};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Provider that reads role names off the identity and fetches the full
/// definitions from a backing catalog
///
/// Names the catalog does not know are skipped.
#[derive(Debug, Clone, Default)]
pub struct IdentityRoleProvider {
    catalog: RoleSet,
}

impl IdentityRoleProvider {
    /// Registry kind name
    pub const KIND: &'static str = "IdentityRoleProvider";

    /// Create a provider over a catalog of role definitions
    pub fn new(catalog: impl IntoIterator<Item = Role>) -> Self {
        Self {
            catalog: catalog.into_iter().collect(),
        }
    }

    /// Create a provider from registry constructor arguments
    pub fn from_args(args: &[Value]) -> Result<Self> {
        Ok(Self {
            catalog: parse_role_definitions(Self::KIND, args)?,
        })
    }
}

impl RoleProvider for IdentityRoleProvider {
    fn roles_for(&self, identity: &dyn Identity) -> RoleSet {
        let names = identity.role_names();
        let roles = self.roles_named(&names);

        if roles.len() < names.len() {
            debug!(
                "Identity role names not in catalog: {:?}",
                names.iter().filter(|n| !roles.contains(n)).collect::<Vec<_>>()
            );
        }

        roles
    }

    fn role(&self, name: &str) -> Option<Arc<Role>> {
        self.catalog.get(name).cloned()
    }

    fn catalog(&self) -> Option<RoleSet> {
        Some(self.catalog.clone())
    }
}
