//! Tests for hierarchy expansion
//!
//! Covers chains, diamonds, cycles, dangling references and multi-provider
//! resolution for both traversal orders.

use super::traversal::{Traversal, TraversalResolver};
use super::HierarchyResolver;
use crate::provider::{InMemoryRoleProvider, RoleProvider};
use crate::types::{Identity, Role, RoleSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn provider(roles: Vec<Role>) -> Arc<dyn RoleProvider> {
    Arc::new(InMemoryRoleProvider::new(roles))
}

fn seeds(provider: &Arc<dyn RoleProvider>, names: &[&str]) -> RoleSet {
    let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    provider.roles_named(&names)
}

fn both_orders() -> [TraversalResolver; 2] {
    [TraversalResolver::breadth_first(), TraversalResolver::depth_first()]
}

/// Provider counting name lookups
struct CountingProvider {
    inner: InMemoryRoleProvider,
    lookups: AtomicUsize,
}

impl RoleProvider for CountingProvider {
    fn roles_for(&self, identity: &dyn Identity) -> RoleSet {
        self.inner.roles_for(identity)
    }

    fn role(&self, name: &str) -> Option<Arc<Role>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.role(name)
    }
}

// ============================================================================
// Basic expansion
// ============================================================================

#[test]
fn test_seed_without_parents() {
    let p = provider(vec![Role::new("viewer")]);
    for resolver in both_orders() {
        let closure = resolver.roles_of_roles(&seeds(&p, &["viewer"]), &[p.clone()]);
        assert_eq!(closure.names(), vec!["viewer"]);
    }
}

#[test]
fn test_linear_chain() {
    // employee -> manager -> director
    let p = provider(vec![
        Role::new("employee").with_parent("manager"),
        Role::new("manager").with_parent("director"),
        Role::new("director"),
    ]);

    for resolver in both_orders() {
        let closure = resolver.roles_of_roles(&seeds(&p, &["employee"]), &[p.clone()]);
        assert_eq!(closure.names(), vec!["director", "employee", "manager"]);
    }
}

#[test]
fn test_diamond_visited_once() {
    // tech_lead -> {manager, developer} -> employee
    let counting = Arc::new(CountingProvider {
        inner: InMemoryRoleProvider::new(vec![
            Role::new("tech_lead").with_parent("manager").with_parent("developer"),
            Role::new("manager").with_parent("employee"),
            Role::new("developer").with_parent("employee"),
            Role::new("employee"),
        ]),
        lookups: AtomicUsize::new(0),
    });
    let p: Arc<dyn RoleProvider> = counting.clone();
    let seed = seeds(&p, &["tech_lead"]);
    counting.lookups.store(0, Ordering::SeqCst);

    let closure = TraversalResolver::breadth_first().roles_of_roles(&seed, &[p]);

    assert_eq!(closure.len(), 4);
    // manager, developer, employee: one lookup each
    assert_eq!(counting.lookups.load(Ordering::SeqCst), 3);
}

#[test]
fn test_empty_seed() {
    let p = provider(vec![Role::new("admin")]);
    let closure = TraversalResolver::default().roles_of_roles(&RoleSet::new(), &[p]);
    assert!(closure.is_empty());
}

// ============================================================================
// Cycles
// ============================================================================

#[test]
fn test_two_role_cycle_terminates() {
    let p = provider(vec![
        Role::new("a").with_parent("b"),
        Role::new("b").with_parent("a"),
    ]);

    for resolver in both_orders() {
        let closure = resolver.roles_of_roles(&seeds(&p, &["a"]), &[p.clone()]);
        assert_eq!(closure.names(), vec!["a", "b"]);
    }
}

#[test]
fn test_self_cycle_terminates() {
    let p = provider(vec![Role::new("x").with_parent("x").with_permission("p")]);

    for resolver in both_orders() {
        let closure = resolver.roles_of_roles(&seeds(&p, &["x"]), &[p.clone()]);
        assert_eq!(closure.names(), vec!["x"]);
    }
}

#[test]
fn test_long_cycle_with_tail() {
    // start -> a -> b -> c -> a
    let p = provider(vec![
        Role::new("start").with_parent("a"),
        Role::new("a").with_parent("b"),
        Role::new("b").with_parent("c"),
        Role::new("c").with_parent("a"),
    ]);

    let closure = TraversalResolver::depth_first().roles_of_roles(&seeds(&p, &["start"]), &[p]);
    assert_eq!(closure.names(), vec!["a", "b", "c", "start"]);
}

// ============================================================================
// Dangling references
// ============================================================================

#[test]
fn test_dangling_parent_does_not_abort() {
    let p = provider(vec![
        Role::new("editor").with_parent("ghost").with_parent("admin"),
        Role::new("admin").with_parent("root"),
        Role::new("root"),
    ]);

    for resolver in both_orders() {
        let closure = resolver.roles_of_roles(&seeds(&p, &["editor"]), &[p.clone()]);
        assert_eq!(closure.names(), vec!["admin", "editor", "root"]);
        assert!(!closure.contains("ghost"));
    }
}

#[test]
fn test_all_parents_dangling() {
    let p = provider(vec![Role::new("orphan").with_parent("missing_1").with_parent("missing_2")]);
    let closure = TraversalResolver::default().roles_of_roles(&seeds(&p, &["orphan"]), &[p]);
    assert_eq!(closure.names(), vec!["orphan"]);
}

// ============================================================================
// Multiple providers
// ============================================================================

#[test]
fn test_parent_resolved_by_later_provider() {
    let first = provider(vec![Role::new("editor").with_parent("admin")]);
    let second = provider(vec![Role::new("admin").with_permission("manage_users")]);

    let closure = TraversalResolver::default()
        .roles_of_roles(&seeds(&first, &["editor"]), &[first.clone(), second]);

    assert_eq!(closure.names(), vec!["admin", "editor"]);
    assert!(closure.get("admin").unwrap().has_permission("manage_users"));
}

#[test]
fn test_first_provider_wins() {
    let first = provider(vec![
        Role::new("editor").with_parent("admin"),
        Role::new("admin").with_permission("from_first"),
    ]);
    let second = provider(vec![Role::new("admin").with_permission("from_second")]);

    let closure = TraversalResolver::default()
        .roles_of_roles(&seeds(&first, &["editor"]), &[first.clone(), second]);

    assert!(closure.get("admin").unwrap().has_permission("from_first"));
    assert!(!closure.get("admin").unwrap().has_permission("from_second"));
}

#[test]
fn test_traversal_accessor() {
    assert_eq!(TraversalResolver::default().traversal(), Traversal::BreadthFirst);
    assert_eq!(TraversalResolver::depth_first().traversal(), Traversal::DepthFirst);
}
