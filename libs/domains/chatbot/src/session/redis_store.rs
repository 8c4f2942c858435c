use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::info;

use super::ChatSessionRepository;
use crate::error::{ChatbotError, ChatbotResult};
use crate::models::ChatExchange;

const KEY_PREFIX: &str = "walknex:chat";

/// Redis-backed session store.
///
/// Each session is a Redis list of JSON-encoded exchanges, so appends are a
/// single atomic `RPUSH`.
#[derive(Clone)]
pub struct RedisChatSessionRepository {
    redis: ConnectionManager,
}

impl RedisChatSessionRepository {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }

    /// Connect and verify the connection with `PING`
    pub async fn connect(url: &str) -> ChatbotResult<Self> {
        info!("Connecting session store to Redis");
        let client = redis::Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut conn = manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        Ok(Self::new(manager))
    }

    /// Round-trip check used by the readiness check
    pub async fn ping(&self) -> ChatbotResult<()> {
        let mut conn = self.redis.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    fn key(session_id: &str) -> String {
        format!("{}:{}", KEY_PREFIX, session_id)
    }
}

#[async_trait]
impl ChatSessionRepository for RedisChatSessionRepository {
    async fn get_or_create(&self, session_id: &str) -> ChatbotResult<Vec<ChatExchange>> {
        let mut conn = self.redis.clone();
        let raw: Vec<String> = conn.lrange(Self::key(session_id), 0, -1).await?;

        raw.iter()
            .map(|item| {
                serde_json::from_str(item).map_err(|e| {
                    ChatbotError::Session(format!("Corrupt exchange in {}: {}", session_id, e))
                })
            })
            .collect()
    }

    async fn append_exchange(&self, session_id: &str, exchange: ChatExchange) -> ChatbotResult<()> {
        let mut conn = self.redis.clone();
        let value = serde_json::to_string(&exchange)?;
        conn.rpush::<_, _, ()>(Self::key(session_id), value).await?;
        Ok(())
    }
}
