// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! In-process store.
//!
//! Same contract as the PostgreSQL store, held in a map. Used to run the HTTP
//! layer without a database.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use super::{ShutdownHook, Store};
use crate::error::{Error, ID_NOT_FOUND, RequestError};
use crate::models::{ApiError, Hello, HelloId, NewHello};

/// Map-backed [`Store`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    hellos: RwLock<HashMap<String, Hello>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove the record with `id`, returning it if present.
    pub fn remove(&self, id: &str) -> Option<Hello> {
        self.hellos
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(id)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Hello>> {
        self.hellos
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn initialize(&self) -> Result<ShutdownHook, Error> {
        Ok(ShutdownHook::noop())
    }

    async fn fetch_by_id(&self, request: HelloId) -> Result<Hello, ApiError> {
        self.read()
            .get(&request.id)
            .cloned()
            .ok_or_else(|| RequestError::NotFound(ID_NOT_FOUND).into())
    }

    async fn get_or_create_by_name(&self, request: NewHello) -> Result<Hello, ApiError> {
        let mut hellos = self
            .hellos
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(existing) = hellos.values().find(|h| h.name == request.name) {
            debug!(id = %existing.id, "Found existing hello");
            return Ok(existing.clone());
        }

        let hello = Hello {
            id: Uuid::new_v4().to_string(),
            name: request.name,
        };
        hellos.insert(hello.id.clone(), hello.clone());
        info!(id = %hello.id, "Created hello");
        Ok(hello)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_hello(name: &str) -> NewHello {
        NewHello {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .fetch_by_id(HelloId {
                id: Uuid::new_v4().to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::new(404, "id was not found"));
    }

    #[tokio::test]
    async fn test_create_assigns_uuid() {
        let store = MemoryStore::new();
        let hello = store.get_or_create_by_name(new_hello("Ada")).await.unwrap();

        assert_eq!(hello.name, "Ada");
        assert!(Uuid::parse_str(&hello.id).is_ok());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let store = MemoryStore::new();
        let first = store.get_or_create_by_name(new_hello("Ada")).await.unwrap();
        let second = store.get_or_create_by_name(new_hello("Ada")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_created_id_resolves() {
        let store = MemoryStore::new();
        let created = store.get_or_create_by_name(new_hello("Ada")).await.unwrap();
        let fetched = store
            .fetch_by_id(HelloId {
                id: created.id.clone(),
            })
            .await
            .unwrap();

        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn test_remove_then_recreate_gets_new_id() {
        let store = MemoryStore::new();
        let first = store.get_or_create_by_name(new_hello("Ada")).await.unwrap();
        assert_eq!(store.remove(&first.id), Some(first.clone()));
        assert!(store.is_empty());

        let second = store.get_or_create_by_name(new_hello("Ada")).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_initialize_returns_hook() {
        let store = MemoryStore::new();
        let hook = store.initialize().await.unwrap();
        hook.run().await;
    }
}
