//! Queue/stack based closure expansion

use super::{resolve_role, HierarchyResolver};
use crate::provider::RoleProvider;
use crate::types::RoleSet;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::warn;

/// Order in which discovered roles are expanded
///
/// Only discovery order differs; the resulting closure is the same.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Traversal {
    /// FIFO frontier
    #[default]
    BreadthFirst,
    /// LIFO frontier
    DepthFirst,
}

/// Hierarchy resolver walking parent references with a visited set
///
/// # Algorithm
///
/// 1. Mark every seed name visited and put the seed on the frontier
/// 2. Take a role off the frontier and add it to the closure
/// 3. For each parent name not yet visited: mark it visited, resolve it
///    through the providers, and push it on the frontier if found
/// 4. Repeat until the frontier is empty
///
/// Each name is expanded at most once, which bounds the walk by the number
/// of distinct names even when the graph has cycles.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraversalResolver {
    traversal: Traversal,
}

impl TraversalResolver {
    /// Create a resolver with the given traversal order
    pub fn new(traversal: Traversal) -> Self {
        Self { traversal }
    }

    /// Breadth-first resolver
    pub fn breadth_first() -> Self {
        Self::new(Traversal::BreadthFirst)
    }

    /// Depth-first resolver
    pub fn depth_first() -> Self {
        Self::new(Traversal::DepthFirst)
    }

    /// Traversal order in use
    pub fn traversal(&self) -> Traversal {
        self.traversal
    }
}

impl HierarchyResolver for TraversalResolver {
    fn roles_of_roles(&self, roles: &RoleSet, providers: &[Arc<dyn RoleProvider>]) -> RoleSet {
        let mut closure = RoleSet::new();
        let mut visited: HashSet<String> = HashSet::with_capacity(roles.len());
        let mut frontier = VecDeque::with_capacity(roles.len());

        for role in roles {
            if visited.insert(role.name.clone()) {
                frontier.push_back(Arc::clone(role));
            }
        }

        loop {
            let next = match self.traversal {
                Traversal::BreadthFirst => frontier.pop_front(),
                Traversal::DepthFirst => frontier.pop_back(),
            };
            let Some(role) = next else {
                break;
            };

            for parent in &role.parents {
                if !visited.insert(parent.clone()) {
                    continue;
                }

                match resolve_role(parent, providers) {
                    Some(parent_role) => frontier.push_back(parent_role),
                    None => warn!(
                        "Dangling parent role reference skipped: role '{}' -> parent '{}'",
                        role.name, parent
                    ),
                }
            }

            closure.insert(role);
        }

        closure
    }
}
