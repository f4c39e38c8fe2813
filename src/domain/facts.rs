// Copyright (c) 2025 - Cowboy AI, Inc.
//! Namespaced Facts
//!
//! Facts are free-form key/value data grouped by namespace (e.g. the
//! reporter that collected them). A host has at most one sub-mapping per
//! namespace.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Key/value facts stored under a single namespace
pub type FactMap = Map<String, Value>;

/// Facts keyed by namespace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Facts(BTreeMap<String, FactMap>);

impl Facts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a whole namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>, facts: FactMap) -> Self {
        self.0.insert(namespace.into(), facts);
        self
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.0.contains_key(namespace)
    }

    pub fn namespace(&self, namespace: &str) -> Option<&FactMap> {
        self.0.get(namespace)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge `facts` into a namespace
    ///
    /// New keys are added, existing keys overwritten, other keys retained.
    /// A missing namespace is created from `facts`.
    pub fn merge_in_namespace(&mut self, namespace: &str, facts: &FactMap) {
        let entry = self.0.entry(namespace.to_string()).or_default();
        for (key, value) in facts {
            entry.insert(key.clone(), value.clone());
        }
    }

    /// Replace a namespace's sub-mapping wholesale
    pub fn replace_namespace(&mut self, namespace: &str, facts: FactMap) {
        self.0.insert(namespace.to_string(), facts);
    }

    /// Document-level update: every namespace in `other` replaces ours
    pub fn update(&mut self, other: &Facts) {
        for (namespace, facts) in &other.0 {
            self.replace_namespace(namespace, facts.clone());
        }
    }
}
