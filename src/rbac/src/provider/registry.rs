//! Provider registry: named factories with an instance cache
//!
//! `get(kind, args)` builds a provider the first time a `(kind, args)` pair is
//! requested and hands back the same `Arc` afterwards. Each cached pair owns a
//! `OnceCell`: the map only guards cell lookup, and construction runs on the
//! cell with no map lock held. Concurrent first requests for the same pair
//! construct it once; other pairs are never blocked by a slow construction.

use super::{IdentityRoleProvider, InMemoryRoleProvider, RoleProvider};
use crate::error::{RbacError, Result};
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Constructor for one provider kind
pub type ProviderFactory =
    Arc<dyn Fn(&[Value]) -> Result<Arc<dyn RoleProvider>> + Send + Sync>;

/// Per-key slot, empty until a construction succeeds
type ProviderCell = Arc<OnceCell<Arc<dyn RoleProvider>>>;

/// Cache key: provider kind plus canonical JSON of the arguments
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct ProviderKey {
    kind: String,
    args: String,
}

impl ProviderKey {
    fn new(kind: &str, args: &[Value]) -> Self {
        Self {
            kind: kind.to_string(),
            args: Value::Array(args.to_vec()).to_string(),
        }
    }
}

/// Registry statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Number of registered provider kinds
    pub registered_kinds: usize,
    /// Number of cached provider instances
    pub cached_instances: usize,
    /// Number of successful constructions so far
    pub constructions: usize,
}

/// Factory and cache for role providers
pub struct ProviderRegistry {
    factories: HashMap<String, ProviderFactory>,
    instances: DashMap<ProviderKey, ProviderCell>,
    constructions: AtomicUsize,
}

impl ProviderRegistry {
    /// Create a registry with no provider kinds
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            instances: DashMap::new(),
            constructions: AtomicUsize::new(0),
        }
    }

    /// Create a registry with the built-in provider kinds
    ///
    /// - `InMemoryRoleProvider`
    /// - `IdentityRoleProvider`
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register(InMemoryRoleProvider::KIND, |args| {
                Ok(Arc::new(InMemoryRoleProvider::from_args(args)?) as Arc<dyn RoleProvider>)
            })
            .register(IdentityRoleProvider::KIND, |args| {
                Ok(Arc::new(IdentityRoleProvider::from_args(args)?) as Arc<dyn RoleProvider>)
            });
        registry
    }

    /// Register a provider kind, replacing any previous factory for it
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Result<Arc<dyn RoleProvider>> + Send + Sync + 'static,
    {
        let kind = kind.into();
        self.instances.retain(|key, _| key.kind != kind);
        self.factories.insert(kind, Arc::new(factory));
        self
    }

    /// Whether a provider kind is registered
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Get the provider for `(kind, args)`, constructing it on first use
    ///
    /// # Errors
    ///
    /// - [`RbacError::UnknownProvider`] if `kind` is not registered
    /// - [`RbacError::InvalidArguments`] (or any other error) from the factory;
    ///   nothing is cached in that case
    pub fn get(&self, kind: &str, args: &[Value]) -> Result<Arc<dyn RoleProvider>> {
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| RbacError::UnknownProvider(kind.to_string()))?;

        let key = ProviderKey::new(kind, args);

        // Map guards are released at the end of each statement
        let cached = self.instances.get(&key).map(|cell| Arc::clone(cell.value()));
        let cell = match cached {
            Some(cell) => cell,
            None => Arc::clone(self.instances.entry(key).or_default().value()),
        };

        if let Some(provider) = cell.get() {
            debug!("Role provider cache hit: {}", kind);
            return Ok(Arc::clone(provider));
        }

        let mut constructed = false;
        let provider = cell.get_or_try_init(|| {
            let provider = factory(args)?;
            constructed = true;
            Ok::<_, RbacError>(provider)
        })?;

        if constructed {
            self.constructions.fetch_add(1, Ordering::Relaxed);
            debug!("Constructed role provider: {} ({} args)", kind, args.len());
        }

        Ok(Arc::clone(provider))
    }

    /// Number of successfully constructed, cached providers
    fn cached_instances(&self) -> usize {
        self.instances
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    /// Drop all cached provider instances
    pub fn clear_cache(&self) {
        self.instances.clear();
    }

    /// Get registry statistics
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            registered_kinds: self.factories.len(),
            cached_instances: self.cached_instances(),
            constructions: self.constructions.load(Ordering::Relaxed),
        }
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.factories.keys().collect();
        kinds.sort();
        f.debug_struct("ProviderRegistry")
            .field("kinds", &kinds)
            .field("cached_instances", &self.cached_instances())
            .finish()
    }
}
