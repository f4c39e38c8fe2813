// Copyright (c) 2025 - Cowboy AI, Inc.
//! Canonical Facts Value Object
//!
//! Canonical facts are the identifying attributes of a host (insights id,
//! BIOS UUID, FQDN, MAC addresses, ...). They are modelled as a set of
//! `(name, value)` pairs, and host identity is decided by set containment:
//!
//! ```text
//! existing ⊇ candidate  or  existing ⊆ candidate  ⇒  same host
//! ```
//!
//! Values are compared with JSON containment:
//!
//! - object ⊇ object: every candidate key is present with a containing value
//! - array ⊇ array: every candidate element is contained by some element
//! - scalars: equal
//!
//! A host reporting one more IP or MAC address still contains its earlier
//! sighting.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Canonical facts validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalFactsError {
    #[error("At least one canonical fact is required")]
    Empty,

    #[error("Canonical fact name is empty")]
    EmptyName,
}

/// Non-empty mapping of canonical fact name to value
///
/// # Examples
///
/// ```rust
/// use cim_host_inventory::domain::CanonicalFacts;
/// use serde_json::json;
///
/// let stored = CanonicalFacts::from_pairs([("uuid", json!("x")), ("mac", json!("y"))]).unwrap();
/// let candidate = CanonicalFacts::from_pairs([("uuid", json!("x"))]).unwrap();
///
/// assert!(stored.contains(&candidate));
/// assert!(candidate.is_contained_by(&stored));
/// assert!(candidate.overlaps(&stored));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Value>", into = "BTreeMap<String, Value>")]
pub struct CanonicalFacts(BTreeMap<String, Value>);

impl CanonicalFacts {
    /// Create canonical facts from a map
    ///
    /// # Invariants
    /// - At least one fact
    /// - No empty fact names
    pub fn new(facts: BTreeMap<String, Value>) -> Result<Self, CanonicalFactsError> {
        if facts.is_empty() {
            return Err(CanonicalFactsError::Empty);
        }

        if facts.keys().any(|name| name.is_empty()) {
            return Err(CanonicalFactsError::EmptyName);
        }

        Ok(Self(facts))
    }

    /// Create canonical facts from `(name, value)` pairs
    pub fn from_pairs<K, I>(pairs: I) -> Result<Self, CanonicalFactsError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::new(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Superset test: every fact of `other` is present in `self` with a
    /// containing value
    pub fn contains(&self, other: &CanonicalFacts) -> bool {
        other.0.iter().all(|(name, value)| {
            self.0
                .get(name)
                .is_some_and(|stored| json_contains(stored, value))
        })
    }

    /// Subset test: every pair of `self` is present in `other`
    pub fn is_contained_by(&self, other: &CanonicalFacts) -> bool {
        other.contains(self)
    }

    /// Symmetric identity match used for reconciliation
    pub fn overlaps(&self, other: &CanonicalFacts) -> bool {
        self.contains(other) || self.is_contained_by(other)
    }

    /// Key-level merge: `other` overwrites shared names, names only in `self` are kept
    pub fn merge(&mut self, other: &CanonicalFacts) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed value
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// Whether `stored` contains `candidate`, recursing into objects and arrays
fn json_contains(stored: &Value, candidate: &Value) -> bool {
    match (stored, candidate) {
        (Value::Object(stored), Value::Object(candidate)) => {
            candidate.iter().all(|(key, value)| {
                stored
                    .get(key)
                    .is_some_and(|existing| json_contains(existing, value))
            })
        }
        (Value::Array(stored), Value::Array(candidate)) => candidate
            .iter()
            .all(|value| stored.iter().any(|existing| json_contains(existing, value))),
        // an array contains a bare scalar it holds
        (Value::Array(stored), scalar) if !scalar.is_object() => {
            stored.iter().any(|existing| existing == scalar)
        }
        _ => stored == candidate,
    }
}

impl TryFrom<BTreeMap<String, Value>> for CanonicalFacts {
    type Error = CanonicalFactsError;

    fn try_from(value: BTreeMap<String, Value>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CanonicalFacts> for BTreeMap<String, Value> {
    fn from(value: CanonicalFacts) -> Self {
        value.0
    }
}
