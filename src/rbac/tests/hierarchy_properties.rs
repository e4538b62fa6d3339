//! Property tests for hierarchy expansion over random role graphs
//!
//! Graphs may contain cycles, self references and parents that no provider
//! defines.

use cretoai_rbac::{
    HierarchyResolver, InMemoryRoleProvider, Role, RoleProvider, RoleSet, TraversalResolver,
};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

const DANGLING: usize = 3;

/// Parent indices per role; indices past the role count are dangling
fn graph() -> impl Strategy<Value = Vec<Vec<usize>>> {
    (1usize..12).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(0..n + DANGLING, 0..4), n)
    })
}

fn name(index: usize) -> String {
    format!("role_{}", index)
}

fn build(edges: &[Vec<usize>]) -> Vec<Role> {
    edges
        .iter()
        .enumerate()
        .map(|(i, parents)| {
            parents
                .iter()
                .fold(Role::new(name(i)), |role, p| role.with_parent(name(*p)))
        })
        .collect()
}

/// Reachable role names computed by naive fixpoint iteration
fn reachable(roles: &[Role], seeds: &BTreeSet<String>) -> BTreeSet<String> {
    let known: BTreeSet<&str> = roles.iter().map(|r| r.name.as_str()).collect();
    let mut result: BTreeSet<String> = seeds.clone();

    loop {
        let before = result.len();
        let current = result.clone();
        for role in roles.iter().filter(|r| current.contains(&r.name)) {
            for parent in &role.parents {
                if known.contains(parent.as_str()) {
                    result.insert(parent.clone());
                }
            }
        }
        if result.len() == before {
            return result;
        }
    }
}

proptest! {
    #[test]
    fn closure_matches_reachability(edges in graph(), seed_mask in any::<u16>()) {
        let roles = build(&edges);
        let provider: Arc<dyn RoleProvider> = Arc::new(InMemoryRoleProvider::new(roles.clone()));

        let seed_names: Vec<String> = (0..edges.len())
            .filter(|i| (seed_mask >> *i) & 1 == 1)
            .map(name)
            .collect();
        let seeds: RoleSet = provider.roles_named(&seed_names);

        let bfs = TraversalResolver::breadth_first().roles_of_roles(&seeds, &[provider.clone()]);
        let dfs = TraversalResolver::depth_first().roles_of_roles(&seeds, &[provider.clone()]);

        let expected = reachable(&roles, &seed_names.iter().cloned().collect());
        let actual: BTreeSet<String> = bfs.names().into_iter().collect();

        prop_assert_eq!(&actual, &expected);
        prop_assert_eq!(bfs.names(), dfs.names());
    }

    #[test]
    fn closure_contains_seeds_and_is_closed(edges in graph()) {
        let roles = build(&edges);
        let provider: Arc<dyn RoleProvider> = Arc::new(InMemoryRoleProvider::new(roles));
        let seeds = provider.roles_named(&[name(0)]);

        let closure = TraversalResolver::default().roles_of_roles(&seeds, &[provider.clone()]);

        prop_assert!(closure.contains(&name(0)));
        for role in &closure {
            for parent in &role.parents {
                if provider.role(parent).is_some() {
                    prop_assert!(closure.contains(parent), "{} missing parent {}", role.name, parent);
                } else {
                    prop_assert!(!closure.contains(parent));
                }
            }
        }
    }
}
