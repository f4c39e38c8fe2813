// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-host-inventory
//!
//! Deterministic accounts, canonical facts and host documents shared by the
//! integration and property tests.

#![allow(dead_code)]

use serde_json::{json, Value};

use cim_host_inventory::domain::{
    AccountNumber, CanonicalFacts, FactMap, Facts, HostId, HostInput, Identity, Tags,
};
use cim_host_inventory::publisher::InMemoryEventPublisher;
use cim_host_inventory::service::InventoryService;
use cim_host_inventory::store::InMemoryHostStore;

pub const ACCOUNT_1: &str = "A1";
pub const ACCOUNT_2: &str = "A2";

pub const UNKNOWN_HOST_ID: &str = "01934f4a-9999-7000-8000-000000009999";

pub type TestService = InventoryService<InMemoryHostStore, InMemoryEventPublisher>;

/// Fresh service over an empty in-memory store, plus its event recorder
pub fn service() -> (TestService, InMemoryEventPublisher) {
    let publisher = InMemoryEventPublisher::new();
    (
        InventoryService::new(InMemoryHostStore::new(), publisher.clone()),
        publisher,
    )
}

pub fn account(account: &str) -> AccountNumber {
    AccountNumber::new(account).expect("Invalid account in test fixture")
}

pub fn identity(account_number: &str) -> Identity {
    Identity::new(account(account_number))
}

pub fn canonical(pairs: &[(&str, &str)]) -> CanonicalFacts {
    CanonicalFacts::from_pairs(pairs.iter().map(|(k, v)| (*k, json!(v))))
        .expect("Invalid canonical facts in test fixture")
}

pub fn host_input(account_number: &str, pairs: &[(&str, &str)]) -> HostInput {
    HostInput::new(account(account_number), canonical(pairs))
}

pub fn tags(tags: &[&str]) -> Tags {
    tags.iter().copied().collect()
}

pub fn fact_map(value: Value) -> FactMap {
    match value {
        Value::Object(map) => map,
        other => panic!("Fact fixture must be an object, got {}", other),
    }
}

pub fn facts(value: Value) -> Facts {
    serde_json::from_value(value).expect("Invalid facts in test fixture")
}

pub fn unknown_host_id() -> HostId {
    UNKNOWN_HOST_ID.parse().expect("Invalid UUID in test fixture")
}
