// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for hello-api.
//!
//! [`RequestError`] classifies per-request failures and is converted into the
//! public [`ApiError`] body at the store boundary. [`Error`] covers startup
//! failures, all of which are fatal.

use thiserror::Error;

use crate::models::ApiError;

/// Message returned for any request body that does not decode.
pub const BAD_JSON: &str = "bad json provided";

/// Message returned when a lookup matches no record.
pub const ID_NOT_FOUND: &str = "id was not found";

/// Message returned when the lookup query itself fails.
pub const SELECT_ID_FAILED: &str = "could not select id";

/// Message returned when the name query of get-or-create fails.
pub const QUERY_NAME_FAILED: &str = "could not query on that name";

/// A failure while serving a single request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RequestError {
    /// The request body was not valid JSON for the expected model.
    #[error("bad json provided")]
    Decode(#[source] serde_json::Error),

    /// No record matched the request.
    #[error("{0}")]
    NotFound(&'static str),

    /// The backing store failed.
    #[error("{message}")]
    Storage {
        /// Message exposed to the client.
        message: String,
        /// Underlying database error, if any.
        #[source]
        source: Option<sqlx::Error>,
    },
}

impl RequestError {
    /// Storage failure with a fixed public message.
    pub fn storage(message: &str, source: sqlx::Error) -> Self {
        Self::Storage {
            message: message.to_string(),
            source: Some(source),
        }
    }

    /// Storage failure that exposes the database message itself.
    pub fn storage_passthrough(source: sqlx::Error) -> Self {
        Self::Storage {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Decode(_) => 400,
            Self::NotFound(_) => 404,
            Self::Storage { .. } => 500,
        }
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::new(err.status_code(), err.to_string())
    }
}

/// Startup and lifecycle errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The database could not be reached.
    #[error("Database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Applying schema migrations failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Binding or serving a listener failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type using hello-api [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
