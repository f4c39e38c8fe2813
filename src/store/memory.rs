// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory host store
//!
//! Hosts are kept in insertion order, which is the natural order used for
//! first-match reconciliation. Every batch is applied under a single write
//! lock.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{HostQuery, HostStore};
use crate::domain::Host;
use crate::errors::{InventoryError, InventoryResult};

/// Host store backed by a shared, insertion-ordered vector
#[derive(Debug, Clone, Default)]
pub struct InMemoryHostStore {
    hosts: Arc<RwLock<Vec<Host>>>,
}

impl InMemoryHostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored hosts across all accounts
    pub async fn len(&self) -> usize {
        self.hosts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.hosts.read().await.is_empty()
    }
}

#[async_trait]
impl HostStore for InMemoryHostStore {
    async fn find(&self, query: &HostQuery) -> InventoryResult<Vec<Host>> {
        let hosts = self.hosts.read().await;
        let found: Vec<Host> = hosts.iter().filter(|h| query.matches(h)).cloned().collect();
        debug!(matched = found.len(), "In-memory query");
        Ok(found)
    }

    async fn insert(&self, host: Host) -> InventoryResult<()> {
        let mut hosts = self.hosts.write().await;

        if hosts.iter().any(|h| h.id == host.id) {
            return Err(InventoryError::Constraint(format!(
                "host {} already exists",
                host.id
            )));
        }

        hosts.push(host);
        Ok(())
    }

    async fn save(&self, updated: Vec<Host>) -> InventoryResult<()> {
        let mut hosts = self.hosts.write().await;

        // Resolve every position first so a bad batch leaves the store untouched
        let mut positions = Vec::with_capacity(updated.len());
        for host in &updated {
            let position = hosts
                .iter()
                .position(|h| h.id == host.id)
                .ok_or_else(|| InventoryError::Constraint(format!("host {} not found", host.id)))?;
            positions.push(position);
        }

        for (position, host) in positions.into_iter().zip(updated) {
            hosts[position] = host;
        }

        Ok(())
    }
}
