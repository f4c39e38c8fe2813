//! NATS client abstraction for inventory messaging

use async_nats::{jetstream, Client, ConnectOptions, Subscriber};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::{InventoryError, InventoryResult};

/// Configuration for NATS connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NatsConfig {
    /// NATS server URLs
    pub servers: Vec<String>,
    /// Client name
    pub name: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Request timeout
    pub request_timeout: Duration,
}

impl Default for NatsConfig {
    fn default() -> Self {
        Self {
            servers: vec!["nats://localhost:4222".to_string()],
            name: "cim-host-inventory".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(5),
        }
    }
}

/// NATS client wrapper used by the event publisher, KV store and responder
#[derive(Clone)]
pub struct NatsClient {
    client: Client,
}

impl NatsClient {
    /// Create a new NATS client with the given configuration
    pub async fn new(config: NatsConfig) -> InventoryResult<Self> {
        let connect_options = ConnectOptions::new()
            .name(&config.name)
            .connection_timeout(config.connect_timeout)
            .request_timeout(Some(config.request_timeout));

        let client = async_nats::connect_with_options(config.servers.join(","), connect_options)
            .await
            .map_err(|e| InventoryError::NatsConnection(e.to_string()))?;

        info!("Connected to NATS at {:?}", config.servers);

        Ok(Self { client })
    }

    /// Publish a JSON-serialized message to a subject
    pub async fn publish<T>(&self, subject: &str, message: &T) -> InventoryResult<()>
    where
        T: Serialize,
    {
        let payload = serde_json::to_vec(message)?;
        self.publish_bytes(subject.to_string(), payload).await
    }

    /// Publish an already-encoded payload
    pub async fn publish_bytes(&self, subject: String, payload: Vec<u8>) -> InventoryResult<()> {
        self.client
            .publish(subject.clone(), payload.into())
            .await
            .map_err(|e| InventoryError::NatsPublish(e.to_string()))?;

        debug!("Published message to subject: {}", subject);
        Ok(())
    }

    /// Subscribe to a subject
    pub async fn subscribe(&self, subject: &str) -> InventoryResult<Subscriber> {
        let subscriber = self
            .client
            .subscribe(subject.to_string())
            .await
            .map_err(|e| InventoryError::NatsSubscribe(e.to_string()))?;

        info!("Subscribed to subject: {}", subject);
        Ok(subscriber)
    }

    /// JetStream context on top of this connection
    pub fn jetstream(&self) -> jetstream::Context {
        jetstream::new(self.client.clone())
    }

    /// Get the underlying NATS client for advanced operations
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NatsConfig::default();
        assert_eq!(config.servers, vec!["nats://localhost:4222".to_string()]);
        assert_eq!(config.name, "cim-host-inventory");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }
}
