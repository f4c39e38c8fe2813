// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host Event Publishing
//!
//! The service hands every committed change to a [`HostEventPublisher`].
//! The NATS implementation routes it to `inventory.hosts.{account}.{operation}`.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::InventoryResult;
use crate::events::HostEvent;
use crate::nats::NatsClient;
use crate::subjects::host_event_subject;

/// Sink for host change events
#[async_trait]
pub trait HostEventPublisher: Send + Sync {
    async fn publish(&self, event: &HostEvent) -> InventoryResult<()>;
}

/// Publishes events to NATS core subjects
#[derive(Clone)]
pub struct NatsHostEventPublisher {
    client: NatsClient,
}

impl NatsHostEventPublisher {
    pub fn new(client: NatsClient) -> Self {
        Self { client }
    }

    /// Subject for an event
    pub fn subject_for(event: &HostEvent) -> String {
        host_event_subject(&event.account, event.operation())
    }
}

#[async_trait]
impl HostEventPublisher for NatsHostEventPublisher {
    async fn publish(&self, event: &HostEvent) -> InventoryResult<()> {
        let subject = Self::subject_for(event);
        self.client.publish(&subject, event).await
    }
}

/// Keeps published events in memory, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventPublisher {
    events: Arc<Mutex<Vec<HostEvent>>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far
    pub async fn events(&self) -> Vec<HostEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl HostEventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: &HostEvent) -> InventoryResult<()> {
        self.events.lock().await.push(event.clone());
        Ok(())
    }
}

/// Discards events
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

#[async_trait]
impl HostEventPublisher for NoopPublisher {
    async fn publish(&self, _event: &HostEvent) -> InventoryResult<()> {
        Ok(())
    }
}

#[async_trait]
impl<P: HostEventPublisher + ?Sized> HostEventPublisher for Arc<P> {
    async fn publish(&self, event: &HostEvent) -> InventoryResult<()> {
        (**self).publish(event).await
    }
}
