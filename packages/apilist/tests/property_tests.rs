//! Property-based tests for indexing and intersection
//!
//! Invariants that should hold for ALL inputs:
//! - Index shape: keys are the distinct namespace prefixes, members sorted and unique
//! - Idempotence: indexing the same lines twice gives the same dump
//! - Commutativity: intersect(A, B) == intersect(B, A)
//! - Global namespaces intersect against the union of every entry

use std::collections::{BTreeMap, BTreeSet};

use apilist::domain::{intersection, NativeFunctionList};
use apilist::{NamespaceApiIndexer, NamespacePolicy};
use proptest::prelude::*;
use quickcheck_macros::quickcheck;

// ============================================================================
// QuickCheck Tests (simpler, faster)
// ============================================================================

#[quickcheck]
fn qc_intersection_is_commutative(a: Vec<String>, b: Vec<String>) -> bool {
    let left = intersection(a.iter().map(String::as_str), b.iter().map(String::as_str));
    let right = intersection(b.iter().map(String::as_str), a.iter().map(String::as_str));
    left == right
}

#[quickcheck]
fn qc_intersection_sorted_unique(a: Vec<String>, b: Vec<String>) -> bool {
    let result = intersection(a.iter().map(String::as_str), b.iter().map(String::as_str));
    result.windows(2).all(|w| w[0] < w[1])
}

// ============================================================================
// PropTest Tests (more powerful, with shrinking)
// ============================================================================

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,6}"
}

/// (namespace segments, member) pairs
fn entries() -> impl Strategy<Value = Vec<(Vec<String>, String)>> {
    prop::collection::vec(
        (prop::collection::vec(segment(), 1..4), segment()),
        0..40,
    )
}

fn to_lines(entries: &[(Vec<String>, String)]) -> Vec<String> {
    entries
        .iter()
        .map(|(ns, member)| format!("{}.{}.json", ns.join("."), member))
        .collect()
}

proptest! {
    #[test]
    fn prop_index_keys_are_distinct_prefixes(entries in entries()) {
        let lines = to_lines(&entries);
        let indexer = NamespaceApiIndexer::from_lines(&lines, NamespacePolicy::default()).unwrap();

        let mut expected: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (ns, member) in &entries {
            expected.entry(ns.join(".")).or_default().insert(member.clone());
        }

        let keys: Vec<&str> = indexer.namespaces();
        let expected_keys: Vec<&str> = expected.keys().map(String::as_str).collect();
        prop_assert_eq!(keys, expected_keys);

        for (ns, members) in indexer.index().iter() {
            let listed: Vec<&String> = members.iter().collect();
            prop_assert!(listed.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(members, &expected[ns]);
        }
    }

    #[test]
    fn prop_indexing_is_idempotent(entries in entries()) {
        let lines = to_lines(&entries);
        let first = NamespaceApiIndexer::from_lines(&lines, NamespacePolicy::default()).unwrap();
        let second = NamespaceApiIndexer::from_lines(&lines, NamespacePolicy::default()).unwrap();

        prop_assert_eq!(first.index(), second.index());
        prop_assert_eq!(first.index().dump_lines(), second.index().dump_lines());
    }

    #[test]
    fn prop_global_namespace_uses_union(
        entries in entries(),
        natives in prop::collection::vec(segment(), 0..20),
    ) {
        let lines = to_lines(&entries);
        let indexer = NamespaceApiIndexer::from_lines(&lines, NamespacePolicy::default()).unwrap();

        let raw: Vec<String> = natives.iter().map(|n| format!("at::{}(Tensor)", n)).collect();
        let native = NativeFunctionList::normalize("at", &raw, indexer.policy()).unwrap();
        let result = indexer.intersect(&native).unwrap();

        let union: BTreeSet<&str> = entries.iter().map(|(_, m)| m.as_str()).collect();
        let native_set: BTreeSet<&str> = natives.iter().map(String::as_str).collect();
        let expected: Vec<String> = union
            .intersection(&native_set)
            .map(|s| s.to_string())
            .collect();

        prop_assert_eq!(result.names, expected);
    }

    #[test]
    fn prop_generic_normalization_strips_qualifier(names in prop::collection::vec(segment(), 1..20)) {
        let raw: Vec<String> = names.iter().map(|n| format!("void ns::{}(int)", n)).collect();
        let native = NativeFunctionList::normalize("ns", &raw, &NamespacePolicy::empty()).unwrap();

        let expected: Vec<String> = names.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(native.names(), expected.as_slice());
    }
}
