//! Machine-readable codes carried in every Walknex API error body.
//!
//! The `error` string is what storefront clients match on and the numeric
//! `code` is what log queries group by. Neither may change for an existing
//! variant.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! // A blank chat message is rejected before it reaches the model.
//! let code = ErrorCode::ValidationError;
//! assert_eq!((code.as_str(), code.code()), ("VALIDATION_ERROR", 1001));
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error category reported to chat and indexing clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A chat message was blank or a similarity query was out of range
    ValidationError,

    BadRequest,

    NotFound,

    /// The body of a chat or indexing request was not the JSON we expect
    JsonExtraction,

    /// Vector store, model provider or session store failed. Upstream detail
    /// stays in the logs.
    InternalError,

    /// Readiness check failed: Redis or the vector store is down
    ServiceUnavailable,

    SerdeJsonError,
}

impl ErrorCode {
    /// Value of the `error` field in the response body
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    /// Value of the `code` field. Request problems sit in the 1000 block,
    /// response encoding failures in the 5000 block.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::BadRequest => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::ServiceUnavailable => 1011,
            Self::SerdeJsonError => 5001,
        }
    }

    /// Message used when the caller has nothing more specific to say.
    /// Internal failures always use this so upstream errors never leak.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::BadRequest => "Bad request",
            Self::NotFound => "Resource not found",
            Self::JsonExtraction => "Failed to parse request body",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::SerdeJsonError => "JSON serialization error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
