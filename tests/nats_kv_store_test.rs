// Copyright (c) 2025 - Cowboy AI, Inc.
//! NATS-backed inventory tests
//!
//! These need a JetStream-enabled NATS server at `NATS_URL`
//! (default `nats://localhost:4222`):
//!
//! ```bash
//! cargo test --test nats_kv_store_test -- --ignored
//! ```

mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;

use cim_host_inventory::api::{run_responder, InventoryReply};
use cim_host_inventory::publisher::NoopPublisher;
use cim_host_inventory::service::{HostInventoryService, HostListFilter};
use cim_host_inventory::store::{HostQuery, HostStore, NatsKvHostStore, NatsKvStoreConfig};
use cim_host_inventory::{InventoryConfig, InventoryService, NatsClient};

use fixtures::*;

async fn connect() -> Result<NatsClient, Box<dyn std::error::Error>> {
    let config = InventoryConfig::from_env()?;
    Ok(NatsClient::new(config.nats).await?)
}

async fn scratch_store(
    client: &NatsClient,
) -> Result<(NatsKvHostStore, String), Box<dyn std::error::Error>> {
    let bucket = format!("TEST_HOSTS_{}", uuid::Uuid::now_v7().simple());
    let store = NatsKvHostStore::open(
        client.jetstream(),
        NatsKvStoreConfig {
            bucket: bucket.clone(),
            history: 1,
        },
    )
    .await?;
    Ok((store, bucket))
}

#[tokio::test]
#[ignore = "requires a running NATS server with JetStream"]
async fn test_kv_store_reconciles_hosts() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await?;
    let (store, bucket) = scratch_store(&client).await?;
    let service = InventoryService::new(store, NoopPublisher);

    let created = service
        .upsert_host(&identity(ACCOUNT_1), host_input(ACCOUNT_1, &[("uuid", "x")]))
        .await?;
    let updated = service
        .upsert_host(
            &identity(ACCOUNT_1),
            host_input(ACCOUNT_1, &[("uuid", "x"), ("mac", "y")]).with_tags(tags(&["prod"])),
        )
        .await?;

    assert_eq!(created.status_code(), 201);
    assert_eq!(updated.status_code(), 200);
    assert_eq!(updated.host().id, created.host().id);

    let list = service
        .list_hosts(&identity(ACCOUNT_1), &HostListFilter::by_tags(["prod"]))
        .await?;
    assert_eq!(list.count, 1);
    assert_eq!(list.results[0].canonical_facts, canonical(&[("uuid", "x"), ("mac", "y")]));

    let other = service
        .store()
        .find(&HostQuery::for_account(&account(ACCOUNT_2)))
        .await?;
    assert!(other.is_empty());

    client.jetstream().delete_key_value(&bucket).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running NATS server with JetStream"]
async fn test_kv_store_rejects_duplicate_insert() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await?;
    let (store, bucket) = scratch_store(&client).await?;
    let service = InventoryService::new(store, NoopPublisher);

    let created = service
        .upsert_host(&identity(ACCOUNT_1), host_input(ACCOUNT_1, &[("uuid", "x")]))
        .await?
        .into_host();

    assert!(service.store().insert(created).await.is_err());

    client.jetstream().delete_key_value(&bucket).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running NATS server"]
async fn test_responder_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await?;
    let subject = format!("test.inventory.{}", uuid::Uuid::now_v7().simple());
    let (service, _) = service();

    let responder = {
        let client = client.clone();
        let subject = subject.clone();
        tokio::spawn(async move { run_responder(client, &subject, Arc::new(service)).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    let request = json!({
        "identity": {"account_number": ACCOUNT_1},
        "operation": "upsert_host",
        "host": {"account": ACCOUNT_1, "canonical_facts": {"uuid": "x"}}
    });
    let message = client
        .inner()
        .request(subject.clone(), serde_json::to_vec(&request)?.into())
        .await?;
    let reply: InventoryReply = serde_json::from_slice(&message.payload)?;

    assert_eq!(reply.status, 201);
    assert_eq!(reply.body["canonical_facts"], json!({"uuid": "x"}));

    responder.abort();
    Ok(())
}
