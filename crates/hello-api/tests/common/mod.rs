// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Common test infrastructure for hello-api integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use hello_api::error::Error;
use hello_api::models::{ApiError, Hello, HelloId, NewHello};
use hello_api::persistence::{PostgresStore, ShutdownHook, Store};

/// Connect to TEST_DATABASE_URL and initialize a store on it.
///
/// Returns the store, its shutdown hook, and a separate pool for
/// out-of-band inspection and cleanup.
pub async fn postgres_store() -> Option<(Arc<PostgresStore>, ShutdownHook, PgPool)> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;
    let store = Arc::new(PostgresStore::connect_lazy(&database_url, 5).ok()?);
    let hook = store.initialize().await.ok()?;
    let pool = PgPool::connect(&database_url).await.ok()?;
    Some((store, hook, pool))
}

/// Delete a record created by a test.
pub async fn delete_hello(pool: &PgPool, id: &str) {
    sqlx::query("DELETE FROM hellos WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .ok();
}

/// Delete every record with `name`.
pub async fn delete_hellos_named(pool: &PgPool, name: &str) {
    sqlx::query("DELETE FROM hellos WHERE name = $1")
        .bind(name)
        .execute(pool)
        .await
        .ok();
}

/// Count records with `name`.
pub async fn count_hellos_named(pool: &PgPool, name: &str) -> i64 {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM hellos WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("Failed to count hellos");
    row.0
}

/// POST `body` to `path` and return the status and raw body.
pub async fn post(router: &Router, path: &str, body: &str) -> (StatusCode, Bytes) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes)
}

/// Store whose every operation fails with a fixed error.
pub struct FailingStore {
    pub error: ApiError,
}

#[async_trait]
impl Store for FailingStore {
    async fn initialize(&self) -> Result<ShutdownHook, Error> {
        Ok(ShutdownHook::noop())
    }

    async fn fetch_by_id(&self, _request: HelloId) -> Result<Hello, ApiError> {
        Err(self.error.clone())
    }

    async fn get_or_create_by_name(&self, _request: NewHello) -> Result<Hello, ApiError> {
        Err(self.error.clone())
    }
}
