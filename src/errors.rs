// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for inventory infrastructure operations

use thiserror::Error;

/// Errors that can occur below the service layer (messaging and storage)
#[derive(Debug, Error)]
pub enum InventoryError {
    /// NATS connection error
    #[error("NATS connection error: {0}")]
    NatsConnection(String),

    /// NATS publish error
    #[error("NATS publish error: {0}")]
    NatsPublish(String),

    /// NATS subscribe error
    #[error("NATS subscribe error: {0}")]
    NatsSubscribe(String),

    /// JetStream key/value bucket error
    #[error("KV store error: {0}")]
    KvStore(String),

    /// A write would violate a store constraint (e.g. duplicate host id)
    #[error("Store constraint violated: {0}")]
    Constraint(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for inventory infrastructure operations
pub type InventoryResult<T> = Result<T, InventoryError>;

impl From<async_nats::Error> for InventoryError {
    fn from(err: async_nats::Error) -> Self {
        InventoryError::NatsConnection(err.to_string())
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::Serialization(err.to_string())
    }
}
