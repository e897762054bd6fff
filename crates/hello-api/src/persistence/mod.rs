// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Persistence interface and backends for hello-api.
//!
//! The HTTP layer only ever sees `Arc<dyn Store>`; which backend sits behind
//! it is decided by whoever builds the router.

pub mod memory;
pub mod postgres;
pub mod timing;

pub use self::memory::MemoryStore;
pub use self::postgres::PostgresStore;

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use crate::error::Error;
use crate::models::{ApiError, Hello, HelloId, NewHello};

/// Persistence capability used by the route handlers.
#[async_trait]
pub trait Store: Send + Sync {
    /// Connect, verify and migrate the backend.
    ///
    /// The returned hook releases the backend's resources and must be run
    /// once at process shutdown.
    async fn initialize(&self) -> Result<ShutdownHook, Error>;

    /// Fetch the record with the requested id.
    ///
    /// Yields a 404 [`ApiError`] when no record matches.
    async fn fetch_by_id(&self, request: HelloId) -> Result<Hello, ApiError>;

    /// Return the record with the requested name, creating it if none exists.
    async fn get_or_create_by_name(&self, request: NewHello) -> Result<Hello, ApiError>;
}

type HookFn = Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send>;

/// Cleanup returned by [`Store::initialize`].
///
/// [`ShutdownHook::run`] consumes the hook, so it cannot run twice.
pub struct ShutdownHook(HookFn);

impl ShutdownHook {
    /// Wrap an async cleanup closure.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self(Box::new(move || Box::pin(f())))
    }

    /// A hook with nothing to release.
    pub fn noop() -> Self {
        Self::new(|| async {})
    }

    /// Run the cleanup.
    pub async fn run(self) {
        (self.0)().await
    }
}

impl fmt::Debug for ShutdownHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ShutdownHook")
    }
}
