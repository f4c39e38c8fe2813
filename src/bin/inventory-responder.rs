// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host Inventory Responder
//!
//! Serves host inventory requests over NATS request/reply and publishes host
//! change events.
//!
//! Run with: cargo run --bin inventory-responder
//!
//! Prerequisites:
//! 1. NATS server running (default: localhost:4222)
//! 2. JetStream enabled when `INVENTORY_STORE=nats`
//!
//! See [`cim_host_inventory::config`] for the environment variables.

use anyhow::{Context, Result};
use cim_host_inventory::{
    api::run_responder,
    publisher::{HostEventPublisher, NatsHostEventPublisher, NoopPublisher},
    store::{HostStore, InMemoryHostStore, NatsKvHostStore},
    InventoryConfig, InventoryService, NatsClient, StoreBackend,
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting host inventory responder");

    let config = InventoryConfig::from_env().context("Invalid inventory configuration")?;
    info!("Configuration loaded:");
    info!("  - NATS servers: {:?}", config.nats.servers);
    info!("  - Store: {}", config.store);
    info!("  - API subject: {}", config.api_subject);
    info!("  - Publish events: {}", config.publish_events);

    let client = NatsClient::new(config.nats.clone())
        .await
        .context("Failed to connect to NATS")?;

    let store: Arc<dyn HostStore> = match config.store {
        StoreBackend::Memory => {
            warn!("Using in-memory host store; records are lost on restart");
            Arc::new(InMemoryHostStore::new())
        }
        StoreBackend::Nats => {
            info!("Opening KV bucket: {}", config.kv.bucket);
            let kv_store = NatsKvHostStore::open(client.jetstream(), config.kv.clone())
                .await
                .context("Failed to open host inventory KV bucket")?;
            Arc::new(kv_store)
        }
    };

    let publisher: Arc<dyn HostEventPublisher> = if config.publish_events {
        Arc::new(NatsHostEventPublisher::new(client.clone()))
    } else {
        Arc::new(NoopPublisher)
    };

    let service = Arc::new(InventoryService::new(store, publisher));

    tokio::select! {
        result = run_responder(client, &config.api_subject, service) => {
            result.context("Responder failed")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("Host inventory responder stopped");
    Ok(())
}
