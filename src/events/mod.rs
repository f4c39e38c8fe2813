// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host Inventory Events
//!
//! Change notifications published after the host store commits a write.
//! They are not the source of truth; the store is. Consumers use them to
//! keep downstream views in sync.
//!
//! # Event Flow
//!
//! ```text
//! Request → InventoryService → HostStore (commit) → HostEvent → NATS
//! ```
//!
//! # Module Organization
//!
//! - [`host`] - `HostEvent` envelope and `HostChange` payloads

pub mod host;

pub use host::{HostChange, HostEvent};
