// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory backend (tests and ephemeral deployments).

use std::sync::Mutex;

use async_trait::async_trait;

use super::{StoreError, UserBackend};
use crate::models::UserProfile;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    users: Mutex<Vec<UserProfile>>,
}

impl MemoryBackend {
    pub fn new(users: Vec<UserProfile>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    /// Copy of whatever was last saved.
    pub fn snapshot(&self) -> Vec<UserProfile> {
        self.users
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl UserBackend for MemoryBackend {
    async fn load(&self) -> Result<Vec<UserProfile>, StoreError> {
        Ok(self.snapshot())
    }

    async fn save(&self, users: &[UserProfile]) -> Result<(), StoreError> {
        let mut stored = self
            .users
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *stored = users.to_vec();
        Ok(())
    }
}
