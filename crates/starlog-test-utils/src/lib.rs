// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for starlog integration tests.
//!
//! Provides an in-memory [`MemoryStore`] implementing the store trait with
//! scripted failures and an injectable live channel, for fast deterministic
//! tests without a hosted backend.

pub mod memory_store;

pub use memory_store::MemoryStore;
