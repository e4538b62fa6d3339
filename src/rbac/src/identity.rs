//! Identity providers
//!
//! Authentication happens elsewhere; the role service only asks "who is the
//! current caller, if anyone?".

use crate::types::Identity;
use parking_lot::RwLock;
use std::sync::Arc;

/// Source of the current identity
pub trait IdentityProvider: Send + Sync {
    /// Current identity, `None` when nobody is authenticated
    fn identity(&self) -> Option<Arc<dyn Identity>>;
}

/// Identity provider returning a settable identity
///
/// Useful for tests, background jobs, and callers that authenticate once.
#[derive(Default)]
pub struct StaticIdentityProvider {
    identity: RwLock<Option<Arc<dyn Identity>>>,
}

impl StaticIdentityProvider {
    /// Provider that always reports no identity
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Provider reporting the given identity
    pub fn new(identity: Arc<dyn Identity>) -> Self {
        Self {
            identity: RwLock::new(Some(identity)),
        }
    }

    /// Replace the current identity
    pub fn set_identity(&self, identity: Option<Arc<dyn Identity>>) {
        *self.identity.write() = identity;
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn identity(&self) -> Option<Arc<dyn Identity>> {
        self.identity.read().clone()
    }
}
