//! Role service: the public entry point
//!
//! # Architecture
//!
//! ```text
//! identity? ──None──> guest role ─┐
//!     │                           ├─> HierarchyResolver ─> AuthorizationEngine ─> bool
//!     └──Some──> RoleProviders ───┘          │
//!                  (config order)            └─ parent names via the same providers
//! ```
//!
//! Assembly is the only fallible step. Once a `RoleService` exists, role
//! resolution and permission checks always return a value.

use crate::config::RbacOptions;
use crate::engine::{AuthorizationEngine, Decision};
use crate::error::{RbacError, Result};
use crate::hierarchy::{HierarchyResolver, TraversalResolver};
use crate::identity::IdentityProvider;
use crate::provider::{ProviderRegistry, RoleProvider};
use crate::types::{Identity, RoleSet};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Role resolution and permission checks for identities
pub struct RoleService {
    /// Role used when no identity is present
    guest_role: String,

    /// Providers in configuration order
    providers: Vec<Arc<dyn RoleProvider>>,

    /// Source of the current identity
    identity_provider: Arc<dyn IdentityProvider>,

    /// Closure expansion strategy
    resolver: Arc<dyn HierarchyResolver>,

    /// Permission decisions
    engine: AuthorizationEngine,
}

impl RoleService {
    /// Assemble a role service
    ///
    /// Providers are obtained from `registry` in configuration order. The
    /// hierarchy is walked breadth-first and no assertions are attached; use
    /// [`with_hierarchy_resolver`](Self::with_hierarchy_resolver) and
    /// [`with_engine`](Self::with_engine) to change that.
    ///
    /// # Errors
    ///
    /// - [`RbacError::Configuration`] if no role provider is configured; no
    ///   provider is constructed in that case
    /// - [`RbacError::UnknownProvider`] / [`RbacError::InvalidArguments`] from
    ///   the registry
    pub fn new(
        options: &RbacOptions,
        registry: &ProviderRegistry,
        identity_provider: Arc<dyn IdentityProvider>,
    ) -> Result<Self> {
        if options.role_provider.is_empty() {
            return Err(RbacError::Configuration(
                "no role provider configured".to_string(),
            ));
        }

        let providers = options
            .role_provider
            .iter()
            .map(|spec| registry.get(&spec.kind, &spec.args))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "RoleService initialized with guest_role={}, providers={:?}",
            options.guest_role,
            options.role_provider.iter().map(|s| s.kind.as_str()).collect::<Vec<_>>()
        );

        Ok(Self {
            guest_role: options.guest_role.clone(),
            providers,
            identity_provider,
            resolver: Arc::new(TraversalResolver::default()),
            engine: AuthorizationEngine::new(),
        })
    }

    /// Replace the hierarchy resolver
    pub fn with_hierarchy_resolver(mut self, resolver: Arc<dyn HierarchyResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replace the authorization engine (e.g., one with assertions)
    pub fn with_engine(mut self, engine: AuthorizationEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Configured guest role name, verbatim
    pub fn guest_role(&self) -> &str {
        &self.guest_role
    }

    /// Providers in configuration order
    pub fn providers(&self) -> &[Arc<dyn RoleProvider>] {
        &self.providers
    }

    /// Hierarchy resolver in use
    pub fn hierarchy_resolver(&self) -> &Arc<dyn HierarchyResolver> {
        &self.resolver
    }

    /// Role closure for an identity, or for the guest role when `None`
    pub fn identity_roles(&self, identity: Option<&dyn Identity>) -> RoleSet {
        let direct = match identity {
            Some(identity) => self.direct_roles(identity),
            None => self.guest_roles(),
        };

        self.resolver.roles_of_roles(&direct, &self.providers)
    }

    /// Role closure for the identity reported by the identity provider
    pub fn current_identity_roles(&self) -> RoleSet {
        let identity = self.identity_provider.identity();
        self.identity_roles(identity.as_deref())
    }

    /// Whether `permission` is granted to an identity (guest when `None`)
    pub fn is_granted(
        &self,
        identity: Option<&dyn Identity>,
        permission: &str,
        context: Option<&Value>,
    ) -> bool {
        let roles = self.identity_roles(identity);
        self.engine.is_granted(&roles, permission, context)
    }

    /// Whether `permission` is granted to the current identity
    pub fn is_granted_current(&self, permission: &str, context: Option<&Value>) -> bool {
        let identity = self.identity_provider.identity();
        self.is_granted(identity.as_deref(), permission, context)
    }

    /// Same rule as [`is_granted`](Self::is_granted), with the granting role and a reason
    pub fn decide(
        &self,
        identity: Option<&dyn Identity>,
        permission: &str,
        context: Option<&Value>,
    ) -> Decision {
        let roles = self.identity_roles(identity);
        self.engine.decide(&roles, permission, context)
    }

    /// Whether any of `role_names` is in the identity's role closure
    pub fn matches_identity_roles(&self, identity: Option<&dyn Identity>, role_names: &[&str]) -> bool {
        if role_names.is_empty() {
            return false;
        }

        let roles = self.identity_roles(identity);
        role_names.iter().any(|name| roles.contains(name))
    }

    /// Union of every provider's roles for `identity`, in configuration order
    fn direct_roles(&self, identity: &dyn Identity) -> RoleSet {
        let mut roles = RoleSet::new();
        for provider in &self.providers {
            roles.extend(provider.roles_for(identity).iter().cloned());
        }
        roles
    }

    /// The guest role, looked up like any other role name
    fn guest_roles(&self) -> RoleSet {
        let mut roles = RoleSet::new();
        match crate::hierarchy::resolve_role(&self.guest_role, &self.providers) {
            Some(role) => {
                roles.insert(role);
            }
            None => debug!("Guest role '{}' not known to any provider", self.guest_role),
        }
        roles
    }
}

impl std::fmt::Debug for RoleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleService")
            .field("guest_role", &self.guest_role)
            .field("providers", &self.providers.len())
            .field("engine", &self.engine)
            .finish()
    }
}
