//! Role service configuration
//!
//! The provider configuration is an ordered list of `(kind, args)` pairs,
//! captured by value when the options are built. Every read hands out a fresh
//! borrow of that list, so a caller that iterated it earlier (even to the end)
//! has no effect on what the role service later sees.
//!
//! ```json
//! {
//!   "guest_role": "guest",
//!   "role_provider": {
//!     "InMemoryRoleProvider": ["foo"]
//!   }
//! }
//! ```

use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Default guest role name
pub const DEFAULT_GUEST_ROLE: &str = "guest";

/// Environment variable overriding the guest role
pub const GUEST_ROLE_ENV: &str = "RBAC_GUEST_ROLE";

fn default_guest_role() -> String {
    DEFAULT_GUEST_ROLE.to_string()
}

/// One configured role provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSpec {
    /// Registered provider kind (e.g., "InMemoryRoleProvider")
    pub kind: String,

    /// Ordered constructor arguments
    pub args: Vec<Value>,
}

impl ProviderSpec {
    /// Create a provider entry
    pub fn new(kind: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            kind: kind.into(),
            args,
        }
    }
}

/// Ordered mapping from provider kind to constructor arguments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<String, Vec<Value>>",
    into = "IndexMap<String, Vec<Value>>"
)]
pub struct ProviderConfig {
    entries: Vec<ProviderSpec>,
}

impl ProviderConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider, keeping configuration order
    pub fn with_provider(mut self, kind: impl Into<String>, args: Vec<Value>) -> Self {
        self.push(ProviderSpec::new(kind, args));
        self
    }

    /// Append a provider entry
    ///
    /// A kind that is already configured has its arguments replaced in place.
    pub fn push(&mut self, spec: ProviderSpec) {
        match self.entries.iter_mut().find(|e| e.kind == spec.kind) {
            Some(existing) => existing.args = spec.args,
            None => self.entries.push(spec),
        }
    }

    /// All entries in configuration order
    pub fn entries(&self) -> &[ProviderSpec] {
        &self.entries
    }

    /// Iterate over the entries from the first one
    pub fn iter(&self) -> std::slice::Iter<'_, ProviderSpec> {
        self.entries.iter()
    }

    /// Number of configured providers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no provider is configured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<IndexMap<String, Vec<Value>>> for ProviderConfig {
    fn from(map: IndexMap<String, Vec<Value>>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(kind, args)| ProviderSpec { kind, args })
                .collect(),
        }
    }
}

impl From<ProviderConfig> for IndexMap<String, Vec<Value>> {
    fn from(config: ProviderConfig) -> Self {
        config
            .entries
            .into_iter()
            .map(|spec| (spec.kind, spec.args))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ProviderConfig {
    type Item = &'a ProviderSpec;
    type IntoIter = std::slice::Iter<'a, ProviderSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Role service options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RbacOptions {
    /// Role used when no identity is present
    #[serde(default = "default_guest_role")]
    pub guest_role: String,

    /// Role providers, queried in this order
    #[serde(default)]
    pub role_provider: ProviderConfig,
}

impl Default for RbacOptions {
    fn default() -> Self {
        Self {
            guest_role: default_guest_role(),
            role_provider: ProviderConfig::default(),
        }
    }
}

impl RbacOptions {
    /// Create options with the given guest role and providers
    pub fn new(guest_role: impl Into<String>, role_provider: ProviderConfig) -> Self {
        Self {
            guest_role: guest_role.into(),
            role_provider,
        }
    }

    /// Parse options from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading RBAC options from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Apply overrides from the environment
    ///
    /// - `RBAC_GUEST_ROLE` - guest role name
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(guest_role) = std::env::var(GUEST_ROLE_ENV) {
            debug!("Guest role overridden from {}: {}", GUEST_ROLE_ENV, guest_role);
            self.guest_role = guest_role;
        }
        self
    }
}
