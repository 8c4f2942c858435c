use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatbotError {
    #[error("Missing required credential: {0}")]
    MissingCredential(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Language model error: {0}")]
    LanguageModel(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ChatbotResult<T> = Result<T, ChatbotError>;

impl From<serde_json::Error> for ChatbotError {
    fn from(err: serde_json::Error) -> Self {
        ChatbotError::Internal(format!("JSON error: {}", err))
    }
}

impl From<redis::RedisError> for ChatbotError {
    fn from(err: redis::RedisError) -> Self {
        ChatbotError::Session(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ChatbotError {
    fn from(err: validator::ValidationErrors) -> Self {
        ChatbotError::Validation(err.to_string())
    }
}

impl From<core_config::ConfigError> for ChatbotError {
    fn from(err: core_config::ConfigError) -> Self {
        ChatbotError::Config(err.to_string())
    }
}

/// Convert ChatbotError to AppError for standardized HTTP error responses.
///
/// Only validation failures keep their message; everything else is logged
/// here and answered with the generic internal error text.
impl From<ChatbotError> for AppError {
    fn from(err: ChatbotError) -> Self {
        match err {
            ChatbotError::Validation(msg) => AppError::BadRequest(msg),
            other => {
                tracing::error!(error = %other, "Chatbot request failed");
                AppError::InternalServerError(
                    ErrorCode::InternalError.default_message().to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ChatbotError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
