//! Error types for role resolution

use thiserror::Error;

/// Errors raised while assembling the role service
///
/// Permission checks never produce these: an ordinary denial is `false`.
#[derive(Debug, Error)]
pub enum RbacError {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider kind not registered with the registry
    #[error("Unknown role provider: {0}")]
    UnknownProvider(String),

    /// Constructor arguments rejected by a provider kind
    #[error("Invalid arguments for role provider '{kind}': {reason}")]
    InvalidArguments {
        /// Provider kind that rejected the arguments
        kind: String,
        /// What was wrong with them
        reason: String,
    },

    /// Configuration could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RbacError {
    /// Shorthand for an [`RbacError::InvalidArguments`]
    pub fn invalid_arguments(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            kind: kind.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for role service assembly
pub type Result<T> = std::result::Result<T, RbacError>;
