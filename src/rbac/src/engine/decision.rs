//! Authorization decision types

use serde::{Deserialize, Serialize};

/// Why a decision came out the way it did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecisionReason {
    /// Permission found on a role in the closure
    Granted {
        /// Role carrying the permission
        role: String,
    },

    /// Permission found but its assertion rejected the request
    AssertionFailed {
        /// Role carrying the permission
        role: String,
    },

    /// No role in the closure carries the permission
    NotFound,

    /// The closure is empty
    NoRoles,
}

/// Authorization decision with metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the permission is granted
    pub allowed: bool,

    /// Permission that was checked
    pub permission: String,

    /// Reason for the decision
    pub reason: DecisionReason,

    /// Names of the roles in the closure that was checked
    pub resolved_roles: Vec<String>,
}

impl Decision {
    /// Create an allow decision
    pub fn allow(permission: impl Into<String>, role: impl Into<String>, resolved_roles: Vec<String>) -> Self {
        Self {
            allowed: true,
            permission: permission.into(),
            reason: DecisionReason::Granted { role: role.into() },
            resolved_roles,
        }
    }

    /// Create a deny decision
    pub fn deny(permission: impl Into<String>, reason: DecisionReason, resolved_roles: Vec<String>) -> Self {
        Self {
            allowed: false,
            permission: permission.into(),
            reason,
            resolved_roles,
        }
    }

    /// Role that carried the permission, if one did
    pub fn matched_role(&self) -> Option<&str> {
        match &self.reason {
            DecisionReason::Granted { role } | DecisionReason::AssertionFailed { role } => {
                Some(role.as_str())
            }
            DecisionReason::NotFound | DecisionReason::NoRoles => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_creation() {
        let allow = Decision::allow("edit", "editor", vec!["editor".to_string()]);
        assert!(allow.allowed);
        assert_eq!(allow.matched_role(), Some("editor"));

        let deny = Decision::deny("delete", DecisionReason::NotFound, vec![]);
        assert!(!deny.allowed);
        assert_eq!(deny.matched_role(), None);
    }

    #[test]
    fn test_reason_serialization() {
        let reason = DecisionReason::Granted { role: "admin".to_string() };
        let json = serde_json::to_value(&reason).unwrap();
        assert_eq!(json, serde_json::json!({"type": "granted", "role": "admin"}));
    }
}
