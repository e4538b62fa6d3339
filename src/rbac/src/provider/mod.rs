//! Role providers
//!
//! A provider turns an identity (or a role name) into [`Role`] objects. The
//! role service asks every configured provider, in configuration order, and
//! unions what they return. Parent names met during hierarchy expansion are
//! resolved through the same providers.
//!
//! Finding nothing is never an error: a provider with no roles for an
//! identity returns an empty set.

pub mod identity;
pub mod in_memory;
pub mod registry;

pub use identity::IdentityRoleProvider;
pub use in_memory::InMemoryRoleProvider;
pub use registry::{ProviderFactory, ProviderRegistry, RegistryStats};

use crate::error::{RbacError, Result};
use crate::types::{Identity, Role, RoleSet};
use serde_json::Value;
use std::sync::Arc;

/// Source of roles
pub trait RoleProvider: Send + Sync {
    /// Roles this provider assigns to `identity`
    fn roles_for(&self, identity: &dyn Identity) -> RoleSet;

    /// Look up a single role by name
    fn role(&self, name: &str) -> Option<Arc<Role>>;

    /// Full static role set, for catalog-style providers
    fn catalog(&self) -> Option<RoleSet> {
        None
    }

    /// Look up several roles by name, skipping the unknown ones
    fn roles_named(&self, names: &[String]) -> RoleSet {
        names.iter().filter_map(|name| self.role(name)).collect()
    }
}

/// Build role definitions from provider constructor arguments
///
/// Each argument is either a role name (`"admin"`) or a definition object
/// (`{"name": "editor", "parents": ["admin"], "permissions": ["edit"]}`).
/// When a name is defined twice the first definition is kept.
pub fn parse_role_definitions(kind: &str, args: &[Value]) -> Result<RoleSet> {
    let mut roles = RoleSet::new();

    for (index, arg) in args.iter().enumerate() {
        let role = match arg {
            Value::String(name) => Role::new(name.as_str()),
            Value::Object(_) => serde_json::from_value::<Role>(arg.clone()).map_err(|e| {
                RbacError::invalid_arguments(
                    kind,
                    format!("argument {} is not a valid role definition: {}", index, e),
                )
            })?,
            other => {
                return Err(RbacError::invalid_arguments(
                    kind,
                    format!(
                        "argument {} must be a role name or a role definition, got {}",
                        index, other
                    ),
                ))
            }
        };

        if role.name.is_empty() {
            return Err(RbacError::invalid_arguments(
                kind,
                format!("argument {} has an empty role name", index),
            ));
        }

        roles.insert(Arc::new(role));
    }

    Ok(roles)
}
