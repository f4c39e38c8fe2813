// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host Inventory Domain Models
//!
//! Value objects with validation invariants and the [`Host`] entity.
//!
//! # Value Objects with Invariants
//!
//! - [`AccountNumber`] - Tenant boundary, non-empty
//! - [`CanonicalFacts`] - Non-empty identifying facts with set-containment matching
//! - [`Facts`] - Free-form facts, one sub-mapping per namespace
//! - [`Tags`] - Duplicate-free tag set
//! - [`HostId`] - UUID v7 host identity
//!
//! # Entities
//!
//! - [`Host`] - Inventory record, created and updated from [`HostInput`] documents

pub mod account;
pub mod canonical_facts;
pub mod facts;
pub mod host;
pub mod tags;

pub use account::{AccountError, AccountNumber, Identity};
pub use canonical_facts::{CanonicalFacts, CanonicalFactsError};
pub use facts::{FactMap, Facts};
pub use host::{Host, HostId, HostIdError, HostInput};
pub use tags::{is_valid_tag, TagOperation, TagOperationError, TagOperationRequest, Tags};
