// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory user collection with write-through persistence.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::{StoreError, UserBackend};
use crate::models::UserProfile;

/// User store, loaded fully at startup and flushed on every upsert.
///
/// At most one record exists per `id`. Upserts are serialized: the write
/// lock is held from the in-memory update until the backend save returns,
/// so concurrent logins cannot drop each other's records.
pub struct UserStore {
    users: RwLock<Vec<UserProfile>>,
    backend: Arc<dyn UserBackend>,
}

impl UserStore {
    /// Load the collection from `backend`.
    pub async fn open(backend: Arc<dyn UserBackend>) -> Result<Self, StoreError> {
        let users = backend.load().await?;
        tracing::info!(count = users.len(), "User store loaded");
        Ok(Self {
            users: RwLock::new(users),
            backend,
        })
    }

    /// Look up a user by ID.
    pub async fn find_by_id(&self, id: u64) -> Option<UserProfile> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.id == id)
            .cloned()
    }

    /// Insert or fully replace the record with `profile.id`, then persist the
    /// whole collection.
    ///
    /// A failed save leaves the in-memory change in place; the next
    /// successful save brings the backend back in line.
    pub async fn upsert(&self, profile: UserProfile) -> Result<(), StoreError> {
        let mut users = self.users.write().await;

        let user_id = profile.id;
        match users.iter_mut().find(|user| user.id == user_id) {
            Some(existing) => *existing = profile,
            None => users.push(profile),
        }

        if let Err(e) = self.backend.save(&users).await {
            tracing::error!(user_id, error = %e, "Failed to persist user store");
            return Err(e);
        }

        tracing::debug!(user_id, count = users.len(), "User store saved");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}
