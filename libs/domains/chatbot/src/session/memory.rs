use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::ChatSessionRepository;
use crate::error::ChatbotResult;
use crate::models::ChatExchange;

/// Process-local session store, used when Redis is not configured
#[derive(Clone, Default)]
pub struct InMemoryChatSessionRepository {
    sessions: Arc<RwLock<HashMap<String, Vec<ChatExchange>>>>,
}

impl InMemoryChatSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatSessionRepository for InMemoryChatSessionRepository {
    async fn get_or_create(&self, session_id: &str) -> ChatbotResult<Vec<ChatExchange>> {
        if let Some(history) = self.sessions.read().await.get(session_id) {
            return Ok(history.clone());
        }

        let mut sessions = self.sessions.write().await;
        let history = sessions.entry(session_id.to_string()).or_default();
        Ok(history.clone())
    }

    async fn append_exchange(&self, session_id: &str, exchange: ChatExchange) -> ChatbotResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .push(exchange);

        tracing::debug!(session_id, "Appended chat exchange");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatMessage;

    fn exchange(user: &str) -> ChatExchange {
        ChatExchange {
            user: user.to_string(),
            assistant: ChatMessage::bot(format!("re: {user}")),
        }
    }

    #[tokio::test]
    async fn test_unknown_session_starts_empty() {
        let repo = InMemoryChatSessionRepository::new();
        assert!(repo.get_or_create("new").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_exchanges_are_appended_in_order() {
        let repo = InMemoryChatSessionRepository::new();
        repo.append_exchange("s1", exchange("first")).await.unwrap();
        repo.append_exchange("s1", exchange("second")).await.unwrap();
        repo.append_exchange("s2", exchange("other")).await.unwrap();

        let history = repo.get_or_create("s1").await.unwrap();
        let users: Vec<&str> = history.iter().map(|e| e.user.as_str()).collect();
        assert_eq!(users, ["first", "second"]);
        assert_eq!(repo.get_or_create("s2").await.unwrap().len(), 1);
    }
}
