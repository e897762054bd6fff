// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Request and response models exchanged over the HTTP API.
//!
//! The set of models is closed: only the types in this module implement
//! [`ApiModel`], and the generic handler accepts nothing else.

use serde::{Deserialize, Deserializer, Serialize};

/// A persisted hello record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hello {
    /// UUID assigned when the record was created.
    pub id: String,
    /// Name the record was created for.
    pub name: String,
}

/// Lookup request for `POST /hello`.
///
/// A missing or `null` id decodes as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloId {
    /// Identifier to look up.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
}

/// Get-or-create request for `POST /newhello`.
///
/// A missing or `null` name decodes as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHello {
    /// Name to find or create a record for.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Error body returned by every failing request.
///
/// `code` mirrors the HTTP status the response is sent with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP status code.
    pub code: u16,
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// Create an error with the given status code and message.
    pub fn new(code: u16, error: impl Into<String>) -> Self {
        Self {
            code,
            error: error.into(),
        }
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Hello {}
    impl Sealed for super::HelloId {}
    impl Sealed for super::NewHello {}
}

/// Marker for the models the API can decode or encode.
///
/// Sealed: implemented only for [`Hello`], [`HelloId`] and [`NewHello`].
pub trait ApiModel: sealed::Sealed + Send + 'static {}

impl ApiModel for Hello {}
impl ApiModel for HelloId {}
impl ApiModel for NewHello {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hello_json_shape() {
        let hello = Hello {
            id: "0b7c3c1e-1d7a-4c43-9a55-2f0f0f8c2a11".to_string(),
            name: "Ada".to_string(),
        };

        let value = serde_json::to_value(&hello).unwrap();
        assert_eq!(
            value,
            json!({"id": "0b7c3c1e-1d7a-4c43-9a55-2f0f0f8c2a11", "name": "Ada"})
        );
    }

    #[test]
    fn test_api_error_json_shape() {
        let err = ApiError::new(404, "id was not found");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value, json!({"code": 404, "error": "id was not found"}));
    }

    #[test]
    fn test_request_models_ignore_unknown_fields() {
        let id: HelloId = serde_json::from_str(r#"{"id": "abc", "extra": true}"#).unwrap();
        assert_eq!(id.id, "abc");

        let new: NewHello = serde_json::from_str(r#"{"name": "Ada", "id": "ignored"}"#).unwrap();
        assert_eq!(new.name, "Ada");
    }

    #[test]
    fn test_request_models_default_missing_fields() {
        let id: HelloId = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(id.id, "");

        let new: NewHello = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(new.name, "");
    }

    #[test]
    fn test_request_models_reject_wrong_types() {
        assert!(serde_json::from_str::<HelloId>(r#"{"id": 42}"#).is_err());
        assert!(serde_json::from_str::<NewHello>(r#"{"name": ["x"]}"#).is_err());
        assert!(serde_json::from_str::<NewHello>(r#"{"name": false}"#).is_err());
    }
}
