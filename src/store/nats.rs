// Copyright (c) 2025 - Cowboy AI, Inc.
//! NATS JetStream Key/Value Host Store
//!
//! Persists each host as one JSON entry in a JetStream KV bucket, keyed by
//! host id. Predicates are evaluated client-side after loading the bucket.
//!
//! # Ordering
//!
//! KV buckets have no insertion order, so results are sorted by
//! `(created_on, id)`. Host ids are UUID v7, which keeps this close to
//! creation order.
//!
//! # Batch Semantics
//!
//! A batch is fully validated and serialized before the first write. Writes
//! are per key; a connection failure mid-batch can leave earlier entries
//! written.

use async_nats::jetstream::context::GetStreamErrorKind;
use async_nats::jetstream::kv::{Config as KvConfig, Store as KvStore};
use async_nats::jetstream::{Context as JetStreamContext, ErrorCode};
use async_trait::async_trait;
use futures::TryStreamExt;
use tracing::{debug, info};

use super::{HostQuery, HostStore};
use crate::domain::Host;
use crate::errors::{InventoryError, InventoryResult};

/// KV bucket configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NatsKvStoreConfig {
    /// Bucket name
    pub bucket: String,
    /// Revisions kept per host
    pub history: i64,
}

impl Default for NatsKvStoreConfig {
    fn default() -> Self {
        Self {
            bucket: "HOST_INVENTORY".to_string(),
            history: 5,
        }
    }
}

/// Host store on a JetStream key/value bucket
pub struct NatsKvHostStore {
    kv: KvStore,
}

impl NatsKvHostStore {
    /// Open the bucket, creating it if it does not exist yet
    ///
    /// Only a "stream not found" answer leads to creation; connection and
    /// timeout failures are returned as `KvStore` errors.
    pub async fn open(
        jetstream: JetStreamContext,
        config: NatsKvStoreConfig,
    ) -> InventoryResult<Self> {
        let kv = if bucket_exists(&jetstream, &config.bucket).await? {
            jetstream
                .get_key_value(config.bucket.clone())
                .await
                .map_err(|e| InventoryError::KvStore(e.to_string()))?
        } else {
            info!(bucket = %config.bucket, "Creating host inventory KV bucket");
            jetstream
                .create_key_value(KvConfig {
                    bucket: config.bucket.clone(),
                    history: config.history,
                    ..Default::default()
                })
                .await
                .map_err(|e| InventoryError::KvStore(e.to_string()))?
        };

        Ok(Self { kv })
    }

    async fn load(&self, key: &str) -> InventoryResult<Option<Host>> {
        let entry = self
            .kv
            .get(key)
            .await
            .map_err(|e| InventoryError::KvStore(e.to_string()))?;

        entry
            .map(|bytes| {
                serde_json::from_slice::<Host>(&bytes)
                    .map_err(|e| InventoryError::Deserialization(e.to_string()))
            })
            .transpose()
    }

    async fn load_all(&self) -> InventoryResult<Vec<Host>> {
        let keys: Vec<String> = self
            .kv
            .keys()
            .await
            .map_err(|e| InventoryError::KvStore(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| InventoryError::KvStore(e.to_string()))?;

        let mut hosts = Vec::with_capacity(keys.len());
        for key in keys {
            // entries deleted between listing and reading are skipped
            if let Some(host) = self.load(&key).await? {
                hosts.push(host);
            }
        }

        hosts.sort_by(|a, b| (a.created_on, a.id).cmp(&(b.created_on, b.id)));
        Ok(hosts)
    }

    async fn exists(&self, host: &Host) -> InventoryResult<bool> {
        Ok(self.load(&host.id.to_string()).await?.is_some())
    }

    async fn put(&self, key: String, payload: Vec<u8>) -> InventoryResult<()> {
        self.kv
            .put(key, payload.into())
            .await
            .map_err(|e| InventoryError::KvStore(e.to_string()))?;
        Ok(())
    }
}

/// KV buckets are backed by a `KV_{bucket}` stream
async fn bucket_exists(jetstream: &JetStreamContext, bucket: &str) -> InventoryResult<bool> {
    match jetstream.get_stream(format!("KV_{}", bucket)).await {
        Ok(_) => Ok(true),
        Err(e) if is_stream_not_found(&e.kind()) => Ok(false),
        Err(e) => Err(InventoryError::KvStore(e.to_string())),
    }
}

fn is_stream_not_found(kind: &GetStreamErrorKind) -> bool {
    matches!(
        kind,
        GetStreamErrorKind::JetStream(e) if e.error_code() == ErrorCode::STREAM_NOT_FOUND
    )
}

#[async_trait]
impl HostStore for NatsKvHostStore {
    async fn find(&self, query: &HostQuery) -> InventoryResult<Vec<Host>> {
        let found: Vec<Host> = self
            .load_all()
            .await?
            .into_iter()
            .filter(|h| query.matches(h))
            .collect();

        debug!(matched = found.len(), "KV query");
        Ok(found)
    }

    async fn insert(&self, host: Host) -> InventoryResult<()> {
        if self.exists(&host).await? {
            return Err(InventoryError::Constraint(format!(
                "host {} already exists",
                host.id
            )));
        }

        let payload = serde_json::to_vec(&host)?;
        self.put(host.id.to_string(), payload).await
    }

    async fn save(&self, hosts: Vec<Host>) -> InventoryResult<()> {
        let mut staged = Vec::with_capacity(hosts.len());
        for host in &hosts {
            if !self.exists(host).await? {
                return Err(InventoryError::Constraint(format!("host {} not found", host.id)));
            }
            staged.push((host.id.to_string(), serde_json::to_vec(host)?));
        }

        for (key, payload) in staged {
            self.put(key, payload).await?;
        }

        debug!(count = hosts.len(), "Committed host batch to KV");
        Ok(())
    }
}
