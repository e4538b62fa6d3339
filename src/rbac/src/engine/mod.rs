//! Permission checks over a role closure
//!
//! A permission is granted when some role in the closure carries it
//! directly and, if an assertion is registered for that permission, the
//! assertion accepts the request. Anything else is a deny; checks never fail.

pub mod assertion;
pub mod decision;

pub use assertion::{Assertion, AssertionRequest, ContextEquals};
pub use decision::{Decision, DecisionReason};

use crate::types::RoleSet;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Authorization engine
#[derive(Clone, Default)]
pub struct AuthorizationEngine {
    /// Assertions keyed by permission
    assertions: HashMap<String, Arc<dyn Assertion>>,
}

impl AuthorizationEngine {
    /// Create an engine with no assertions
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an assertion to a permission, replacing any previous one
    pub fn with_assertion<A>(mut self, permission: impl Into<String>, assertion: A) -> Self
    where
        A: Assertion + 'static,
    {
        self.assertions.insert(permission.into(), Arc::new(assertion));
        self
    }

    /// Attach a closure as the assertion for a permission
    pub fn with_assertion_fn<F>(self, permission: impl Into<String>, assertion: F) -> Self
    where
        F: Fn(&AssertionRequest<'_>) -> bool + Send + Sync + 'static,
    {
        self.with_assertion(permission, assertion)
    }

    /// Whether an assertion is attached to `permission`
    pub fn has_assertion(&self, permission: &str) -> bool {
        self.assertions.contains_key(permission)
    }

    /// Decide whether `permission` is granted by `roles`
    pub fn is_granted(&self, roles: &RoleSet, permission: &str, context: Option<&Value>) -> bool {
        self.decide(roles, permission, context).allowed
    }

    /// Decide with the granting role and a reason
    ///
    /// Roles are scanned in name order, so the reported role is stable.
    pub fn decide(&self, roles: &RoleSet, permission: &str, context: Option<&Value>) -> Decision {
        let resolved_roles = roles.names();

        if roles.is_empty() {
            debug!("Deny '{}': no roles", permission);
            return Decision::deny(permission, DecisionReason::NoRoles, resolved_roles);
        }

        let Some(role) = roles.iter().find(|role| role.has_permission(permission)) else {
            debug!("Deny '{}': not granted by {:?}", permission, resolved_roles);
            return Decision::deny(permission, DecisionReason::NotFound, resolved_roles);
        };

        if let Some(assertion) = self.assertions.get(permission) {
            let request = AssertionRequest {
                permission,
                roles,
                context,
            };

            if !assertion.assert(&request) {
                debug!("Deny '{}': assertion rejected (role '{}')", permission, role.name);
                return Decision::deny(
                    permission,
                    DecisionReason::AssertionFailed {
                        role: role.name.clone(),
                    },
                    resolved_roles,
                );
            }
        }

        debug!("Allow '{}' via role '{}'", permission, role.name);
        Decision::allow(permission, role.name.clone(), resolved_roles)
    }
}

impl std::fmt::Debug for AuthorizationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut permissions: Vec<_> = self.assertions.keys().collect();
        permissions.sort();
        f.debug_struct("AuthorizationEngine")
            .field("assertions", &permissions)
            .finish()
    }
}
