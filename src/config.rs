// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `NATS_URL` | `nats://localhost:4222` (comma separated for several servers) |
//! | `INVENTORY_CLIENT_NAME` | `cim-host-inventory` |
//! | `INVENTORY_STORE` | `memory` (`memory` or `nats`) |
//! | `INVENTORY_KV_BUCKET` | `HOST_INVENTORY` |
//! | `INVENTORY_API_SUBJECT` | `inventory.api.hosts` |
//! | `INVENTORY_PUBLISH_EVENTS` | `true` |

use std::fmt;
use std::str::FromStr;

use crate::errors::{InventoryError, InventoryResult};
use crate::nats::NatsConfig;
use crate::store::NatsKvStoreConfig;
use crate::subjects::DEFAULT_API_SUBJECT;

/// Which host store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Process-local store; contents are lost on restart
    #[default]
    Memory,
    /// JetStream key/value bucket
    Nats,
}

impl FromStr for StoreBackend {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "nats" | "kv" => Ok(StoreBackend::Nats),
            other => Err(InventoryError::Configuration(format!(
                "unknown store backend: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Nats => write!(f, "nats"),
        }
    }
}

/// Runtime configuration for the inventory responder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    pub nats: NatsConfig,
    pub store: StoreBackend,
    pub kv: NatsKvStoreConfig,
    /// Subject the request/reply responder listens on
    pub api_subject: String,
    /// Publish change events after each committed write
    pub publish_events: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            nats: NatsConfig::default(),
            store: StoreBackend::default(),
            kv: NatsKvStoreConfig::default(),
            api_subject: DEFAULT_API_SUBJECT.to_string(),
            publish_events: true,
        }
    }
}

impl InventoryConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> InventoryResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> InventoryResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(urls) = lookup("NATS_URL") {
            let servers: Vec<String> = urls
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if servers.is_empty() {
                return Err(InventoryError::Configuration("NATS_URL is empty".to_string()));
            }
            config.nats.servers = servers;
        }

        if let Some(name) = lookup("INVENTORY_CLIENT_NAME") {
            config.nats.name = name;
        }

        if let Some(store) = lookup("INVENTORY_STORE") {
            config.store = store.parse()?;
        }

        if let Some(bucket) = lookup("INVENTORY_KV_BUCKET") {
            config.kv.bucket = bucket;
        }

        if let Some(subject) = lookup("INVENTORY_API_SUBJECT") {
            config.api_subject = subject;
        }

        if let Some(flag) = lookup("INVENTORY_PUBLISH_EVENTS") {
            config.publish_events = parse_bool(&flag).ok_or_else(|| {
                InventoryError::Configuration(format!(
                    "INVENTORY_PUBLISH_EVENTS must be true or false, got {}",
                    flag
                ))
            })?;
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
