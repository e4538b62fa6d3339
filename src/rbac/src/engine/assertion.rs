//! Dynamic permission assertions

use crate::types::RoleSet;
use serde_json::Value;

/// Input handed to an assertion
#[derive(Debug, Clone, Copy)]
pub struct AssertionRequest<'a> {
    /// Permission being checked
    pub permission: &'a str,

    /// Role closure that granted the permission
    pub roles: &'a RoleSet,

    /// Caller context, passed through untouched
    pub context: Option<&'a Value>,
}

/// Extra condition attached to a permission
///
/// Only consulted once the permission was found in the role closure; the
/// final decision is "found AND assertion holds". An assertion that panics
/// has a bug and the panic is not caught.
pub trait Assertion: Send + Sync {
    /// Whether the permission should be granted for this request
    fn assert(&self, request: &AssertionRequest<'_>) -> bool;
}

impl<F> Assertion for F
where
    F: Fn(&AssertionRequest<'_>) -> bool + Send + Sync,
{
    fn assert(&self, request: &AssertionRequest<'_>) -> bool {
        self(request)
    }
}

/// Assertion comparing a context field against an expected value
///
/// `context` must be a JSON object containing `field` equal to `expected`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextEquals {
    field: String,
    expected: Value,
}

impl ContextEquals {
    /// Create the assertion
    pub fn new(field: impl Into<String>, expected: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
        }
    }
}

impl Assertion for ContextEquals {
    fn assert(&self, request: &AssertionRequest<'_>) -> bool {
        request
            .context
            .and_then(|context| context.get(&self.field))
            .is_some_and(|value| *value == self.expected)
    }
}
