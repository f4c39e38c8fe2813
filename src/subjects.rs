// Copyright (c) 2025 - Cowboy AI, Inc.

//! NATS subject hierarchy for host inventory
//!
//! # Subject Pattern
//!
//! Change notifications follow the hierarchical pattern:
//!
//! ```text
//! inventory.hosts.{account}.{operation}
//! ```
//!
//! This allows for:
//! - Precise subscriptions (`inventory.hosts.000501.created`)
//! - Account-level wildcards (`inventory.hosts.000501.>`)
//! - Global subscriptions (`inventory.hosts.>`)
//!
//! Requests to the inventory responder go to `inventory.api.hosts`.
//!
//! # Examples
//!
//! ```rust
//! use cim_host_inventory::domain::AccountNumber;
//! use cim_host_inventory::subjects::{HostOperation, SubjectBuilder};
//!
//! let account = AccountNumber::new("000501").unwrap();
//!
//! let subject = SubjectBuilder::new()
//!     .account(&account)
//!     .operation(HostOperation::Created)
//!     .build();
//! assert_eq!(subject.as_deref(), Some("inventory.hosts.000501.created"));
//!
//! let wildcard = SubjectBuilder::new().account(&account).build_wildcard();
//! assert_eq!(wildcard, "inventory.hosts.000501.>");
//! ```

use std::fmt;

use crate::domain::AccountNumber;

/// Root namespace for all inventory subjects
pub const INVENTORY_ROOT: &str = "inventory";

/// Aggregate segment for host records
pub const HOSTS_SEGMENT: &str = "hosts";

/// Default subject the request/reply responder listens on
pub const DEFAULT_API_SUBJECT: &str = "inventory.api.hosts";

/// Host change operations (event types)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOperation {
    /// A host was created by upsert
    Created,
    /// A host was updated by upsert
    Updated,
    /// Facts were merged into a namespace
    FactsMerged,
    /// A fact namespace was replaced
    FactsReplaced,
    /// A tag was applied
    TagApplied,
    /// A tag was removed
    TagRemoved,
}

impl fmt::Display for HostOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostOperation::Created => write!(f, "created"),
            HostOperation::Updated => write!(f, "updated"),
            HostOperation::FactsMerged => write!(f, "facts_merged"),
            HostOperation::FactsReplaced => write!(f, "facts_replaced"),
            HostOperation::TagApplied => write!(f, "tag_applied"),
            HostOperation::TagRemoved => write!(f, "tag_removed"),
        }
    }
}

/// Builder for host inventory NATS subjects
#[derive(Debug, Clone, Default)]
pub struct SubjectBuilder {
    account: Option<String>,
    operation: Option<HostOperation>,
}

impl SubjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the account segment
    pub fn account(mut self, account: &AccountNumber) -> Self {
        self.account = Some(account.to_string());
        self
    }

    /// Set the operation segment
    pub fn operation(mut self, operation: HostOperation) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Build the complete subject, or `None` if a segment is missing
    pub fn build(self) -> Option<String> {
        let account = self.account?;
        let operation = self.operation?;
        Some(format!(
            "{}.{}.{}.{}",
            INVENTORY_ROOT, HOSTS_SEGMENT, account, operation
        ))
    }

    /// Wildcard for every operation in the account, or every account if unset
    pub fn build_wildcard(self) -> String {
        match self.account {
            Some(account) => format!("{}.{}.{}.>", INVENTORY_ROOT, HOSTS_SEGMENT, account),
            None => Self::build_all(),
        }
    }

    /// Returns: `inventory.hosts.>`
    pub fn build_all() -> String {
        format!("{}.{}.>", INVENTORY_ROOT, HOSTS_SEGMENT)
    }
}

/// Subject for a change in `account`
pub fn host_event_subject(account: &AccountNumber, operation: HostOperation) -> String {
    format!("{}.{}.{}.{}", INVENTORY_ROOT, HOSTS_SEGMENT, account, operation)
}
