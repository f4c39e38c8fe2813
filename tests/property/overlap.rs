// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Canonical-Fact Overlap
//!
//! Overlap is the identity relation used by upsert: two fact sets match when
//! one is a subset of the other, comparing whole values.

use cim_host_inventory::domain::CanonicalFacts;
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::BTreeMap;

// ============================================================================
// Property Test Strategies
// ============================================================================

fn fact_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("insights_id".to_string()),
        Just("subscription_manager_id".to_string()),
        Just("bios_uuid".to_string()),
        Just("fqdn".to_string()),
        Just("mac_addresses".to_string()),
        "[a-z]{1,8}",
    ]
}

fn fact_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z0-9]{1,6}".prop_map(Value::from),
        (0i64..1000).prop_map(Value::from),
        prop::collection::vec("[a-f0-9]{2}", 1..3).prop_map(|v| json!(v)),
    ]
}

fn canonical_facts() -> impl Strategy<Value = CanonicalFacts> {
    prop::collection::btree_map(fact_name(), fact_value(), 1..6)
        .prop_map(|map| CanonicalFacts::new(map).expect("strategy yields non-empty facts"))
}

/// A non-empty subset of `facts`, chosen by a keep mask
fn subset_of(facts: &CanonicalFacts, mask: &[bool]) -> CanonicalFacts {
    let mut picked: BTreeMap<String, Value> = facts
        .iter()
        .zip(mask.iter().cycle())
        .filter(|(_, keep)| **keep)
        .map(|((k, v), _)| (k.clone(), v.clone()))
        .collect();

    if picked.is_empty() {
        let (k, v) = facts.iter().next().expect("facts are never empty");
        picked.insert(k.clone(), v.clone());
    }
    CanonicalFacts::new(picked).expect("subset is non-empty")
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Overlap is reflexive
    #[test]
    fn prop_overlap_is_reflexive(facts in canonical_facts()) {
        prop_assert!(facts.overlaps(&facts));
    }

    /// Property: Overlap is symmetric
    #[test]
    fn prop_overlap_is_symmetric(a in canonical_facts(), b in canonical_facts()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    /// Property: Any subset overlaps its superset, in both directions
    #[test]
    fn prop_subset_overlaps_superset(
        facts in canonical_facts(),
        mask in prop::collection::vec(any::<bool>(), 1..6),
    ) {
        let subset = subset_of(&facts, &mask);

        prop_assert!(facts.contains(&subset));
        prop_assert!(subset.is_contained_by(&facts));
        prop_assert!(subset.overlaps(&facts));
        prop_assert!(facts.overlaps(&subset));
    }

    /// Property: Changing one shared value breaks overlap
    ///
    /// Values are compared whole, so a differing value on any shared name
    /// means neither set contains the other.
    #[test]
    fn prop_conflicting_value_never_overlaps(facts in canonical_facts()) {
        let mut changed: BTreeMap<String, Value> =
            facts.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        let first = changed.keys().next().cloned().expect("facts are never empty");
        changed.insert(first, json!({"conflict": true}));
        let changed = CanonicalFacts::new(changed).expect("same names as facts");

        prop_assert!(!facts.overlaps(&changed));
    }

    /// Property: A list-valued fact contains any non-empty subset of its items
    #[test]
    fn prop_list_value_contains_its_subsets(
        items in prop::collection::btree_set("[a-f0-9]{2}", 1..6),
        mask in prop::collection::vec(any::<bool>(), 1..6),
    ) {
        let items: Vec<String> = items.into_iter().collect();
        let mut kept: Vec<&String> = items
            .iter()
            .zip(mask.iter().cycle())
            .filter(|(_, keep)| **keep)
            .map(|(item, _)| item)
            .collect();
        if kept.is_empty() {
            kept.push(&items[0]);
        }

        let full = CanonicalFacts::from_pairs([("mac_addresses", json!(items))])
            .expect("non-empty facts");
        let partial = CanonicalFacts::from_pairs([("mac_addresses", json!(kept))])
            .expect("non-empty facts");

        prop_assert!(full.contains(&partial));
        prop_assert!(full.overlaps(&partial));
    }

    /// Property: Merge keeps every existing name and overlaps the incoming facts
    #[test]
    fn prop_merge_is_superset_of_incoming(a in canonical_facts(), b in canonical_facts()) {
        let mut merged = a.clone();
        merged.merge(&b);

        prop_assert!(merged.contains(&b));
        for (name, _) in a.iter() {
            prop_assert!(merged.get(name).is_some());
        }
    }
}
