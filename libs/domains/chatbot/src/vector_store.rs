use async_trait::async_trait;
use serde_json::Value;

use crate::error::ChatbotResult;
use crate::schema::CollectionSchema;

/// Remote vector store holding the `Product` and `Conversation` collections.
///
/// The store vectorizes objects itself; callers only ever send text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Names of all collections that currently exist
    async fn list_collections(&self) -> ChatbotResult<Vec<String>>;

    /// Create a collection with its property schema and vectorizer
    async fn create_collection(&self, schema: &CollectionSchema) -> ChatbotResult<()>;

    /// Store one object in `collection`
    async fn create_object(&self, collection: &str, properties: Value) -> ChatbotResult<()>;

    /// Semantic search by text, returning raw objects in relevance order.
    /// Only the properties declared in `schema` are requested.
    async fn near_text(
        &self,
        schema: &CollectionSchema,
        query: &str,
        limit: u32,
    ) -> ChatbotResult<Vec<Value>>;
}
