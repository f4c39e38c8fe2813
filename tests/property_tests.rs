// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Entry Point
//!
//! This test suite uses proptest to verify the reconciliation and tagging
//! properties that must hold for all valid host documents.

mod fixtures;
mod property;
