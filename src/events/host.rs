// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host Change Events
//!
//! Emitted after a write has been committed to the host store. Past tense
//! naming, one event per committed write or batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AccountNumber, Host, HostId};
use crate::subjects::HostOperation;

/// What changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostChange {
    /// A host was seen for the first time
    Created { host: Host },

    /// An existing host was reconciled with a new sighting
    Updated { host: Host },

    /// Facts were merged into a namespace on a batch of hosts
    FactsMerged {
        host_ids: Vec<HostId>,
        namespace: String,
    },

    /// A namespace was replaced on a batch of hosts
    FactsReplaced {
        host_ids: Vec<HostId>,
        namespace: String,
    },

    /// A tag was applied to a batch of hosts
    TagApplied { host_ids: Vec<HostId>, tag: String },

    /// A tag was removed from a batch of hosts
    TagRemoved { host_ids: Vec<HostId>, tag: String },
}

impl HostChange {
    pub fn operation(&self) -> HostOperation {
        match self {
            HostChange::Created { .. } => HostOperation::Created,
            HostChange::Updated { .. } => HostOperation::Updated,
            HostChange::FactsMerged { .. } => HostOperation::FactsMerged,
            HostChange::FactsReplaced { .. } => HostOperation::FactsReplaced,
            HostChange::TagApplied { .. } => HostOperation::TagApplied,
            HostChange::TagRemoved { .. } => HostOperation::TagRemoved,
        }
    }
}

/// Change notification envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEvent {
    /// Event version for schema evolution
    pub event_version: u32,

    /// Unique event identifier (UUID v7 for time ordering)
    pub event_id: Uuid,

    /// Account the change happened in
    pub account: AccountNumber,

    /// When the change was committed
    pub timestamp: DateTime<Utc>,

    #[serde(flatten)]
    pub change: HostChange,
}

impl HostEvent {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(account: AccountNumber, timestamp: DateTime<Utc>, change: HostChange) -> Self {
        Self {
            event_version: Self::CURRENT_VERSION,
            event_id: Uuid::now_v7(),
            account,
            timestamp,
            change,
        }
    }

    pub fn operation(&self) -> HostOperation {
        self.change.operation()
    }
}
