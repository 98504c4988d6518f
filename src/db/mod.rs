// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer: user store over a pluggable persistence backend.

pub mod file;
pub mod memory;
pub mod store;

pub use file::JsonFileBackend;
pub use memory::MemoryBackend;
pub use store::UserStore;

use crate::models::UserProfile;
use async_trait::async_trait;

/// Persistence errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("user file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("user file encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Durable backing for the user collection.
///
/// The unit of durability is the whole collection: `save` replaces
/// everything previously stored.
#[async_trait]
pub trait UserBackend: Send + Sync {
    /// Load the full collection.
    async fn load(&self) -> Result<Vec<UserProfile>, StoreError>;

    /// Replace the stored collection with `users`.
    async fn save(&self, users: &[UserProfile]) -> Result<(), StoreError>;
}
