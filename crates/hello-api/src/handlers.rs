// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Generic request handling.
//!
//! Every route runs the same pipeline: decode the body into a request model,
//! invoke one store operation, and encode either the response model or the
//! [`ApiError`] it produced.
//!
//! Decoding is lenient in the same ways as the service's existing clients
//! expect: only the first JSON value in the body is read, object keys match
//! model fields case-insensitively, and a top-level `null` decodes like `{}`.

use std::future::Future;

use axum::Json;
use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde::de::{DeserializeOwned, Error as _};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::RequestError;
use crate::models::{ApiError, ApiModel};

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Decode the first JSON value in `body` as `M`.
///
/// Anything after that value is ignored. Keys are folded to lowercase before
/// `M` sees them, so request models must use lowercase field names; when two
/// keys fold together the one already in lowercase wins. Any value other than
/// an object or `null` is rejected.
pub fn decode<M: DeserializeOwned>(body: &[u8]) -> Result<M, serde_json::Error> {
    let first = serde_json::Deserializer::from_slice(body)
        .into_iter::<Value>()
        .next()
        .unwrap_or_else(|| Err(serde_json::Error::custom("empty request body")))?;

    let folded = match first {
        Value::Null => Value::Object(Map::new()),
        Value::Object(fields) => {
            let mut folded = Map::new();
            for (key, value) in fields {
                let lower = key.to_lowercase();
                if lower == key {
                    folded.insert(key, value);
                } else {
                    folded.entry(lower).or_insert(value);
                }
            }
            Value::Object(folded)
        }
        _ => return Err(serde_json::Error::custom("request body must be a JSON object")),
    };

    serde_json::from_value(folded)
}

/// Decode `body` as `M`, run `operation` on it and encode the outcome.
///
/// A body that does not decode answers 400 without calling `operation`. An
/// [`ApiError`] from the operation is sent with its own code as the status.
pub async fn dispatch<M, R, F, Fut>(body: Bytes, operation: F) -> Response
where
    M: ApiModel + DeserializeOwned,
    R: ApiModel + Serialize,
    F: FnOnce(M) -> Fut,
    Fut: Future<Output = Result<R, ApiError>>,
{
    let request: M = match decode(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Rejecting request body");
            return ApiError::from(RequestError::Decode(e)).into_response();
        }
    };

    match operation(request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => err.into_response(),
    }
}
