mod memory;
mod redis_store;

pub use memory::InMemoryChatSessionRepository;
pub use redis_store::RedisChatSessionRepository;

use async_trait::async_trait;

use crate::error::ChatbotResult;
use crate::models::ChatExchange;

/// Persistence for chat histories, keyed by an opaque session id.
///
/// Histories are append-only from the chatbot's side.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatSessionRepository: Send + Sync {
    /// Full history for `session_id`, oldest first. Unknown ids start empty.
    async fn get_or_create(&self, session_id: &str) -> ChatbotResult<Vec<ChatExchange>>;

    /// Append one exchange to the end of the history
    async fn append_exchange(&self, session_id: &str, exchange: ChatExchange) -> ChatbotResult<()>;
}
