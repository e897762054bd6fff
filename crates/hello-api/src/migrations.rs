// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Schema for the `hellos` table.
//!
//! | Version | Migration | Effect |
//! |---------|-----------|--------|
//! | 1 | `create_hellos` | `hellos (id TEXT PRIMARY KEY, name TEXT NOT NULL)` |
//! | 2 | `unique_hello_names` | unique index `hellos_name_key` on `name` |
//!
//! Version 2 is what lets get-or-create insert with `ON CONFLICT (name)`, so
//! two racing requests for one name end up with a single row. Both scripts use
//! `IF NOT EXISTS` and can be applied over a table created by hand.
//! [`PostgresStore::initialize`](crate::persistence::PostgresStore) applies
//! them on every start.

use sqlx::migrate::MigrateError;

/// Migrator for `migrations/postgresql`, embedded at compile time.
pub static POSTGRES: sqlx::migrate::Migrator = sqlx::migrate!("./migrations/postgresql");

/// Bring the `hellos` schema up to date; versions already recorded in
/// `_sqlx_migrations` are skipped.
pub async fn run_postgres(pool: &sqlx::PgPool) -> Result<(), MigrateError> {
    POSTGRES.run(pool).await
}
