// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host Store Abstraction
//!
//! The persistent record store behind the inventory service. A store must
//! support the predicates of [`HostQuery`] and commit a batch of updated
//! hosts as one unit.
//!
//! # Architecture
//!
//! ```text
//! Request → InventoryService → HostStore → Persistent Storage
//!                  ↓
//!           HostEventPublisher
//! ```
//!
//! # Store Requirements
//!
//! 1. **Stable Order**: `find` returns hosts in a stable natural order; the
//!    upsert path relies on it to pick the first overlapping host
//! 2. **Batch Commit**: `save` writes the whole batch or nothing
//! 3. **No Deletion**: the core never removes records

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::Host;
use crate::errors::InventoryResult;

pub mod memory;
pub mod nats;
pub mod query;

pub use memory::InMemoryHostStore;
pub use nats::{NatsKvHostStore, NatsKvStoreConfig};
pub use query::HostQuery;

/// Persistent host record store
#[async_trait]
pub trait HostStore: Send + Sync {
    /// All hosts matching `query`, in the store's natural order
    async fn find(&self, query: &HostQuery) -> InventoryResult<Vec<Host>>;

    /// First host matching `query` in the store's natural order
    async fn find_first(&self, query: &HostQuery) -> InventoryResult<Option<Host>> {
        Ok(self.find(query).await?.into_iter().next())
    }

    /// Persist a new host
    ///
    /// # Errors
    ///
    /// - `Constraint` if a host with the same id already exists
    async fn insert(&self, host: Host) -> InventoryResult<()>;

    /// Commit updated versions of existing hosts as one batch
    ///
    /// # Errors
    ///
    /// - `Constraint` if any host in the batch is not already stored; nothing
    ///   is written in that case
    async fn save(&self, hosts: Vec<Host>) -> InventoryResult<()>;
}

#[async_trait]
impl<S: HostStore + ?Sized> HostStore for Arc<S> {
    async fn find(&self, query: &HostQuery) -> InventoryResult<Vec<Host>> {
        (**self).find(query).await
    }

    async fn find_first(&self, query: &HostQuery) -> InventoryResult<Option<Host>> {
        (**self).find_first(query).await
    }

    async fn insert(&self, host: Host) -> InventoryResult<()> {
        (**self).insert(host).await
    }

    async fn save(&self, hosts: Vec<Host>) -> InventoryResult<()> {
        (**self).save(hosts).await
    }
}
