// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Hello API - JSON records over PostgreSQL
//!
//! A small HTTP service with two endpoints over one table (`hellos`): look a
//! record up by id, and get-or-create a record by name.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐      ┌───────────────────────────┐
//! │        HTTP clients          │      │   Orchestrator checks     │
//! └──────────────┬───────────────┘      └─────────────┬─────────────┘
//!                │ POST /hello, /newhello             │ GET /health
//!                ▼                                    ▼
//! ┌──────────────────────────────┐      ┌───────────────────────────┐
//! │  API server (port 8080)      │      │ Health server (port 7000) │
//! │  decode → store op → encode  │      └───────────────────────────┘
//! └──────────────┬───────────────┘
//!                │ Arc<dyn Store>
//!                ▼
//! ┌──────────────────────────────┐
//! │          PostgreSQL          │
//! └──────────────────────────────┘
//! ```
//!
//! # Endpoints
//!
//! | Method | Path | Body | Success | Errors |
//! |--------|------|------|---------|--------|
//! | POST | `/hello` | `{"id": "..."}` | `{"id", "name"}` | 400, 404, 500 |
//! | POST | `/newhello` | `{"name": "..."}` | `{"id", "name"}` | 400, 500 |
//!
//! Errors are always `{"code": <status>, "error": "<message>"}`.
//!
//! # Configuration
//!
//! | Flag | Variable | Default |
//! |------|----------|---------|
//! | `--database-url` | `DATABASE_URI` | local development database |
//! | `--port` | `HELLO_API_PORT` | `8080` |
//! | `--enable-health-check` | `HELLO_API_ENABLE_HEALTH_CHECK` | `true` |
//! | `--health-check-path` | `HELLO_API_HEALTH_CHECK_PATH` | `/health` |
//! | `--health-check-port` | `HELLO_API_HEALTH_CHECK_PORT` | `7000` |
//! | `--max-connections` | `HELLO_API_DB_MAX_CONNECTIONS` | `10` |
//!
//! # Modules
//!
//! - [`config`]: command line and environment configuration
//! - [`error`]: request error taxonomy and startup errors
//! - [`handlers`]: the generic decode/invoke/encode handler
//! - [`migrations`]: embedded schema migrations
//! - [`models`]: request and response models
//! - [`persistence`]: the [`Store`](persistence::Store) capability and its backends
//! - [`server`]: route registration and listeners

#![deny(missing_docs)]

/// Command line and environment configuration.
pub mod config;

/// Error types with HTTP status mapping.
pub mod error;

/// Generic request handler.
pub mod handlers;

/// Embedded database migrations.
pub mod migrations;

/// API models.
pub mod models;

/// Store capability and backends.
pub mod persistence;

/// Routing and HTTP listeners.
pub mod server;
