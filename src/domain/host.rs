// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host Entity
//!
//! A host is a machine known to the inventory, identified within its account
//! by its canonical facts.
//!
//! # Time as Parameter
//!
//! Creation and update take the timestamp explicitly; the domain never reads
//! the clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use super::{AccountNumber, CanonicalFacts, Facts, Tags};

/// Host identifier parse error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid host id: {0}")]
pub struct HostIdError(String);

/// Opaque unique host identifier (UUID v7, time ordered)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostId(Uuid);

impl HostId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HostId {
    type Err = HostIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| HostIdError(s.to_string()))
    }
}

/// Candidate host document submitted for upsert
///
/// Optional fields that are absent leave the stored value untouched on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInput {
    pub account: AccountNumber,

    pub canonical_facts: CanonicalFacts,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facts: Option<Facts>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl HostInput {
    pub fn new(account: AccountNumber, canonical_facts: CanonicalFacts) -> Self {
        Self {
            account,
            canonical_facts,
            facts: None,
            tags: None,
            display_name: None,
        }
    }

    pub fn with_facts(mut self, facts: Facts) -> Self {
        self.facts = Some(facts);
        self
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

/// Stored host record; also its external JSON representation
///
/// # Invariants
/// - Belongs to exactly one account
/// - Canonical facts non-empty (enforced by [`CanonicalFacts`])
/// - Tags free of duplicates (enforced by [`Tags`])
/// - At most one fact sub-mapping per namespace (enforced by [`Facts`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub id: HostId,
    pub account: AccountNumber,
    pub display_name: Option<String>,
    pub canonical_facts: CanonicalFacts,
    #[serde(default)]
    pub facts: Facts,
    #[serde(default)]
    pub tags: Tags,
    pub created_on: DateTime<Utc>,
    pub modified_on: DateTime<Utc>,
}

impl Host {
    /// Build a new host from a candidate document
    pub fn from_input(id: HostId, input: HostInput, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            account: input.account,
            display_name: input.display_name,
            canonical_facts: input.canonical_facts,
            facts: input.facts.unwrap_or_default(),
            tags: input.tags.unwrap_or_default(),
            created_on: timestamp,
            modified_on: timestamp,
        }
    }

    /// Apply a later sighting of this host
    ///
    /// - canonical facts: key-level merge
    /// - facts: namespaces present in the input replace ours
    /// - tags: union
    /// - display name: overwritten when present
    pub fn update(&mut self, input: &HostInput, timestamp: DateTime<Utc>) {
        self.canonical_facts.merge(&input.canonical_facts);

        if let Some(facts) = &input.facts {
            self.facts.update(facts);
        }

        if let Some(tags) = &input.tags {
            self.tags.extend(tags);
        }

        if let Some(display_name) = &input.display_name {
            self.display_name = Some(display_name.clone());
        }

        self.modified_on = timestamp;
    }

    /// Whether this host may be the same machine as the candidate facts
    pub fn matches(&self, canonical_facts: &CanonicalFacts) -> bool {
        self.canonical_facts.overlaps(canonical_facts)
    }
}
