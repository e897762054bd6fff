// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! PostgreSQL-backed store.
//!
//! Query helpers are plain functions over a [`PgPool`] so tests can drive them
//! directly; [`PostgresStore`] maps their results onto the API error contract.
//! Each helper records its query time on the caller's span (`select_ms`,
//! `insert_ms`, `health_check_ms`).

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::field::Empty;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::timing::timed;
use super::{ShutdownHook, Store};
use crate::error::{Error, ID_NOT_FOUND, QUERY_NAME_FAILED, RequestError, SELECT_ID_FAILED};
use crate::migrations;
use crate::models::{ApiError, Hello, HelloId, NewHello};

const HEALTH_CHECK: &str = "SELECT 1";

const SELECT_BY_ID: &str = r#"
    SELECT id, name
    FROM hellos
    WHERE id = $1
"#;

const SELECT_BY_NAME: &str = r#"
    SELECT id, name
    FROM hellos
    WHERE name = $1
    ORDER BY id
"#;

const INSERT_HELLO: &str = r#"
    INSERT INTO hellos (id, name)
    VALUES ($1, $2)
    ON CONFLICT (name) DO NOTHING
    RETURNING id, name
"#;

/// PostgreSQL-backed [`Store`].
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a lazily connecting pool for `database_url`.
    ///
    /// Nothing is dialed until [`Store::initialize`] runs; only a malformed
    /// URL fails here.
    pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy(database_url)
            .map_err(Error::Connection)?;
        Ok(Self::new(pool))
    }

    /// The underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Round-trip a trivial query to prove the database is reachable.
pub async fn health_check_db(pool: &PgPool) -> Result<(), sqlx::Error> {
    let row: (i32,) = timed(HEALTH_CHECK, sqlx::query_as(HEALTH_CHECK).fetch_one(pool))
        .await
        .record("health_check_ms")?;
    debug!(result = row.0, "Database health check passed");
    Ok(())
}

/// Select the hello with the given id.
pub async fn select_hello_by_id(pool: &PgPool, id: &str) -> Result<Option<Hello>, sqlx::Error> {
    timed(
        SELECT_BY_ID,
        sqlx::query_as::<_, Hello>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(pool),
    )
    .await
    .record("select_ms")
}

/// Select every hello with the given name.
pub async fn select_hellos_by_name(pool: &PgPool, name: &str) -> Result<Vec<Hello>, sqlx::Error> {
    timed(
        SELECT_BY_NAME,
        sqlx::query_as::<_, Hello>(SELECT_BY_NAME)
            .bind(name)
            .fetch_all(pool),
    )
    .await
    .record("select_ms")
}

/// Insert a hello unless one with the same name already exists.
///
/// Returns `None` when the name was taken, e.g. by a concurrent insert.
pub async fn insert_hello(pool: &PgPool, hello: &Hello) -> Result<Option<Hello>, sqlx::Error> {
    timed(
        INSERT_HELLO,
        sqlx::query_as::<_, Hello>(INSERT_HELLO)
            .bind(&hello.id)
            .bind(&hello.name)
            .fetch_optional(pool),
    )
    .await
    .record("insert_ms")
}

// ============================================================================
// Store
// ============================================================================

#[async_trait]
impl Store for PostgresStore {
    #[instrument(skip(self), fields(health_check_ms = Empty))]
    async fn initialize(&self) -> Result<ShutdownHook, Error> {
        info!("Connecting to database...");
        health_check_db(&self.pool)
            .await
            .map_err(Error::Connection)?;
        info!("Database connection established");

        info!("Running database migrations...");
        migrations::run_postgres(&self.pool).await?;
        info!("Migrations completed");

        let pool = self.pool.clone();
        Ok(ShutdownHook::new(move || async move {
            info!("Closing database pool");
            pool.close().await;
        }))
    }

    #[instrument(skip(self, request), fields(id = %request.id, select_ms = Empty))]
    async fn fetch_by_id(&self, request: HelloId) -> Result<Hello, ApiError> {
        match select_hello_by_id(&self.pool, &request.id).await {
            Ok(Some(hello)) => Ok(hello),
            Ok(None) => {
                debug!("No hello with this id");
                Err(RequestError::NotFound(ID_NOT_FOUND).into())
            }
            Err(e) => {
                error!(error = %e, "Failed to select hello by id");
                Err(RequestError::storage(SELECT_ID_FAILED, e).into())
            }
        }
    }

    #[instrument(
        skip(self, request),
        fields(name = %request.name, select_ms = Empty, insert_ms = Empty)
    )]
    async fn get_or_create_by_name(&self, request: NewHello) -> Result<Hello, ApiError> {
        let existing = select_hellos_by_name(&self.pool, &request.name)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query hellos by name");
                ApiError::from(RequestError::storage(QUERY_NAME_FAILED, e))
            })?;

        debug!(count = existing.len(), "Queried hellos by name");

        if let Some(hello) = existing.into_iter().next() {
            return Ok(hello);
        }

        let hello = Hello {
            id: Uuid::new_v4().to_string(),
            name: request.name,
        };

        match insert_hello(&self.pool, &hello).await {
            Ok(Some(created)) => {
                info!(id = %created.id, "Created hello");
                Ok(created)
            }
            Ok(None) => {
                // A concurrent request inserted the same name between our
                // select and insert; its row wins.
                warn!("Name was created concurrently, returning existing row");
                let winner = select_hellos_by_name(&self.pool, &hello.name)
                    .await
                    .map_err(|e| {
                        error!(error = %e, "Failed to re-query hellos by name");
                        ApiError::from(RequestError::storage(QUERY_NAME_FAILED, e))
                    })?;
                winner.into_iter().next().ok_or_else(|| {
                    RequestError::storage(QUERY_NAME_FAILED, sqlx::Error::RowNotFound).into()
                })
            }
            Err(e) => {
                error!(error = %e, "Failed to insert hello");
                Err(RequestError::storage_passthrough(e).into())
            }
        }
    }
}
