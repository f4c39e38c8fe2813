// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Canonical-fact overlap and reconciliation properties, plus tag
//! idempotency.

mod overlap;
mod reconciliation;
