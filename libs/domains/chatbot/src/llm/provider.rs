use async_trait::async_trait;

use crate::error::ChatbotResult;

/// Two-turn prompt: system instruction and the raw user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
}

/// Trait for chat-completion providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Run one completion and return the reply text as-is
    async fn complete(&self, prompt: ChatPrompt) -> ChatbotResult<String>;
}
