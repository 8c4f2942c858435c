//! Application state management

use domain_chatbot::{ChatSessionRepository, ChatbotAI, RedisChatSessionRepository};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub chatbot: ChatbotAI,
    pub sessions: Arc<dyn ChatSessionRepository>,
    /// Set when sessions live in Redis, for the readiness check
    pub redis_sessions: Option<RedisChatSessionRepository>,
}
