//! Custom extractors for Axum handlers.

pub mod json_body;
pub mod validated_json;

pub use json_body::JsonBody;
pub use validated_json::ValidatedJson;
