// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host Query Predicates
//!
//! A [`HostQuery`] is a conjunction of the predicates the inventory needs
//! from a store: equality on account, id membership, tag containment,
//! display-name substring, fact-namespace existence and canonical-fact
//! overlap. Unset predicates match everything.

use crate::domain::{AccountNumber, CanonicalFacts, Host, HostId};

/// Conjunctive filter over stored hosts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostQuery {
    pub account: Option<AccountNumber>,
    pub ids: Option<Vec<HostId>>,
    pub tags: Vec<String>,
    pub display_name: Option<String>,
    pub namespace: Option<String>,
    pub overlapping: Option<CanonicalFacts>,
}

impl HostQuery {
    /// Query matching every host
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to a single account
    pub fn for_account(account: &AccountNumber) -> Self {
        Self {
            account: Some(account.clone()),
            ..Self::default()
        }
    }

    /// Restrict to hosts whose id is in `ids`
    pub fn with_ids(mut self, ids: &[HostId]) -> Self {
        self.ids = Some(ids.to_vec());
        self
    }

    /// Require every tag in `tags` (AND semantics)
    pub fn with_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        self.tags = tags.iter().map(|t| t.as_ref().to_string()).collect();
        self
    }

    /// Require a display name containing `fragment`
    pub fn with_display_name_containing(mut self, fragment: impl Into<String>) -> Self {
        self.display_name = Some(fragment.into());
        self
    }

    /// Require an existing facts namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Require canonical facts that contain or are contained by `facts`
    pub fn overlapping(mut self, facts: &CanonicalFacts) -> Self {
        self.overlapping = Some(facts.clone());
        self
    }

    /// Evaluate the predicate against a host
    pub fn matches(&self, host: &Host) -> bool {
        if let Some(account) = &self.account {
            if &host.account != account {
                return false;
            }
        }

        if let Some(ids) = &self.ids {
            if !ids.contains(&host.id) {
                return false;
            }
        }

        if !host.tags.contains_all(&self.tags) {
            return false;
        }

        if let Some(fragment) = &self.display_name {
            match &host.display_name {
                Some(name) if name.contains(fragment.as_str()) => {}
                _ => return false,
            }
        }

        if let Some(namespace) = &self.namespace {
            if !host.facts.has_namespace(namespace) {
                return false;
            }
        }

        if let Some(facts) = &self.overlapping {
            if !host.matches(facts) {
                return false;
            }
        }

        true
    }
}
