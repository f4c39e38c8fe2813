// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for Host Inventory
//!
//! This module provides the application service that orchestrates domain
//! logic, the host store and change notification.
//!
//! # Architecture
//!
//! ```text
//! Client Request (identity + operation)
//!     ↓
//! Service Layer (this module)
//!     ↓
//! Domain (Host, CanonicalFacts, Facts, Tags)
//!     ↓
//! HostStore (memory or NATS KV)
//!     ↓
//! HostEventPublisher (NATS)
//! ```
//!
//! # Design Principles
//!
//! 1. **Transaction Boundaries**: One store commit per operation
//! 2. **Account Scoping**: Every query and mutation is limited to the caller's account
//! 3. **Time at the Edge**: The service reads the clock; the domain receives timestamps
//! 4. **Async by Default**: All I/O is asynchronous
//!
//! # Example
//!
//! ```rust,no_run
//! use cim_host_inventory::domain::{AccountNumber, CanonicalFacts, HostInput, Identity};
//! use cim_host_inventory::publisher::NoopPublisher;
//! use cim_host_inventory::service::{HostInventoryService, InventoryService};
//! use cim_host_inventory::store::InMemoryHostStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = InventoryService::new(InMemoryHostStore::new(), NoopPublisher);
//!     let account = AccountNumber::new("000501")?;
//!     let identity = Identity::new(account.clone());
//!
//!     let facts = CanonicalFacts::from_pairs([("insights_id", serde_json::json!("abc"))])?;
//!     let result = service.upsert_host(&identity, HostInput::new(account, facts)).await?;
//!     println!("{} {}", result.status_code(), result.host().id);
//!
//!     Ok(())
//! }
//! ```

pub mod host;

pub use host::{
    HostInventoryService, HostList, HostListFilter, InventoryService, ServiceError,
    ServiceResult, UpsertResult,
};
