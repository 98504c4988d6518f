// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON file backend.
//!
//! The file holds a single JSON array of users and is rewritten wholesale
//! on every save.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{StoreError, UserBackend};
use crate::models::UserProfile;

/// Serialized form of an empty collection.
const EMPTY_COLLECTION: &str = "[]";

/// User backend stored as one JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty collection if the file is missing or too short to
    /// hold one.
    async fn ensure_initialized(&self) -> Result<(), StoreError> {
        let needs_init = match tokio::fs::metadata(&self.path).await {
            Ok(meta) => meta.len() < EMPTY_COLLECTION.len() as u64,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        if needs_init {
            tracing::info!(path = %self.path.display(), "Initializing empty user file");
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&self.path, EMPTY_COLLECTION).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl UserBackend for JsonFileBackend {
    async fn load(&self) -> Result<Vec<UserProfile>, StoreError> {
        self.ensure_initialized().await?;
        let raw = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }

    async fn save(&self, users: &[UserProfile]) -> Result<(), StoreError> {
        let encoded = serde_json::to_vec(users)?;
        tokio::fs::write(&self.path, encoded).await?;
        Ok(())
    }
}
