//! # CretoAI Role Resolution
//!
//! Role-based access control core: resolves the roles that apply to an
//! identity (or to the guest role when nobody is authenticated), expands them
//! through the role hierarchy, and answers whether a permission is granted.
//!
//! ## Features
//!
//! - **Pluggable role providers** built by name from ordered configuration
//! - **Memoized provider registry** safe for concurrent first use
//! - **Cycle-safe hierarchy expansion** with lenient dangling references
//! - **Permission assertions** for context-dependent grants
//! - **Two error lanes**: assembly returns `Result`, checks return `bool`
//!
//! ## Example
//!
//! ```rust
//! use cretoai_rbac::{
//!     Principal, ProviderRegistry, RbacOptions, RoleService, StaticIdentityProvider,
//! };
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = RbacOptions::from_json_str(r#"{
//!     "guest_role": "guest",
//!     "role_provider": {
//!         "IdentityRoleProvider": [
//!             "guest",
//!             {"name": "admin", "permissions": ["manage_users"]},
//!             {"name": "editor", "parents": ["admin"], "permissions": ["edit_content"]}
//!         ]
//!     }
//! }"#)?;
//!
//! let registry = ProviderRegistry::with_builtin();
//! let service = RoleService::new(
//!     &options,
//!     &registry,
//!     Arc::new(StaticIdentityProvider::anonymous()),
//! )?;
//!
//! let alice = Principal::new("user:alice@example.com").with_role("editor");
//!
//! assert!(service.is_granted(Some(&alice), "manage_users", None));
//! assert!(!service.is_granted(Some(&alice), "delete_server", None));
//! assert!(!service.is_granted(None, "edit_content", None));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod hierarchy;
pub mod identity;
pub mod provider;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::{ProviderConfig, ProviderSpec, RbacOptions};
pub use engine::{Assertion, AssertionRequest, AuthorizationEngine, Decision, DecisionReason};
pub use error::{RbacError, Result};
pub use hierarchy::{HierarchyResolver, Traversal, TraversalResolver};
pub use identity::{IdentityProvider, StaticIdentityProvider};
pub use provider::{
    IdentityRoleProvider, InMemoryRoleProvider, ProviderRegistry, RoleProvider,
};
pub use service::RoleService;
pub use types::{Identity, PermissionId, Principal, Role, RoleName, RoleSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
