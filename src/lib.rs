//! Host inventory record store for the Composable Information Machine
//!
//! Tracks machines identified by canonical facts, reconciles new sightings
//! with existing records through canonical-fact overlap, and maintains
//! namespaced facts and tags per host, scoped per tenant account.
//!
//! - [`service`] - reconciliation, queries, fact and tag mutation
//! - [`store`] - host store trait with in-memory and NATS KV backends
//! - [`api`] - JSON request/reply surface and NATS responder
//! - [`events`] / [`publisher`] - change notifications after each commit

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod nats;
pub mod publisher;
pub mod service;
pub mod store;
pub mod subjects;

// Re-export commonly used types
pub use config::{InventoryConfig, StoreBackend};
pub use errors::{InventoryError, InventoryResult};
pub use nats::{NatsClient, NatsConfig};
pub use service::{HostInventoryService, InventoryService, ServiceError, ServiceResult};
