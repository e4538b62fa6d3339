//! Role hierarchy expansion
//!
//! Computes the closure of a seed role set over the "parent role" relation.
//! Parent names are resolved through the same providers that supplied the
//! direct roles, first match wins.
//!
//! # Features
//!
//! - **Cycle Safety**: visited names are never expanded twice, so `a -> b -> a`
//!   and `x -> x` terminate
//! - **Lenient References**: a parent no provider can resolve is logged and
//!   skipped, the rest of the graph is still expanded
//! - **Pluggable Order**: breadth-first or depth-first, same resulting set
//!
//! # Example
//!
//! ```rust
//! use cretoai_rbac::hierarchy::{HierarchyResolver, TraversalResolver};
//! use cretoai_rbac::provider::{InMemoryRoleProvider, RoleProvider};
//! use cretoai_rbac::types::{Role, RoleSet};
//! use std::sync::Arc;
//!
//! let provider: Arc<dyn RoleProvider> = Arc::new(InMemoryRoleProvider::new(vec![
//!     Role::new("admin").with_permission("manage_users"),
//!     Role::new("editor").with_parent("admin"),
//! ]));
//!
//! let seeds: RoleSet = provider.roles_named(&["editor".to_string()]);
//! let closure = TraversalResolver::default().roles_of_roles(&seeds, &[provider]);
//!
//! assert_eq!(closure.names(), vec!["admin", "editor"]);
//! ```

pub mod traversal;

#[cfg(test)]
mod tests;

pub use traversal::{Traversal, TraversalResolver};

use crate::provider::RoleProvider;
use crate::types::{Role, RoleSet};
use std::sync::Arc;

/// Strategy for expanding a role set through the hierarchy
pub trait HierarchyResolver: Send + Sync {
    /// Closure of `roles` over parent references, seeds included
    fn roles_of_roles(&self, roles: &RoleSet, providers: &[Arc<dyn RoleProvider>]) -> RoleSet;
}

/// Resolve a role name against the provider chain, first match wins
pub fn resolve_role(name: &str, providers: &[Arc<dyn RoleProvider>]) -> Option<Arc<Role>> {
    providers.iter().find_map(|provider| provider.role(name))
}
