//! Chatbot orchestration: prompt assembly, recommendation gating, cached
//! similarity search and sequential indexing.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

use crate::cache::{CONVERSATION_SEARCH_OP, PRODUCT_SEARCH_OP, ResponseCache};
use crate::config::ChatbotConfig;
use crate::error::ChatbotResult;
use crate::intent::{IntentClassifier, KeywordClassifier};
use crate::llm::{LanguageModel, OpenAIChatModel, OpenAIConfig};
use crate::models::{
    ChatExchange, ChatMessage, ChatRequest, ChatResponse, ConversationInput, ConversationRecord,
    DEFAULT_SEARCH_LIMIT, IndexSummary, ProductInput, ProductRecord,
};
use crate::prompt::build_prompt;
use crate::schema::{CONVERSATION_COLLECTION, CollectionSchema, PRODUCT_COLLECTION, SchemaBootstrapper};
use crate::session::ChatSessionRepository;
use crate::vector_store::VectorStore;
use crate::weaviate::{WeaviateClient, WeaviateConfig};

/// State shared by every [`ChatbotAI`] handle built on it.
///
/// Cache and schema state are locked independently.
#[derive(Debug, Default)]
pub struct ChatbotContext {
    pub cache: ResponseCache,
    pub schema: SchemaBootstrapper,
}

impl ChatbotContext {
    pub fn new(cache: ResponseCache) -> Self {
        Self {
            cache,
            schema: SchemaBootstrapper::new(),
        }
    }

    pub fn from_config(config: &ChatbotConfig) -> Self {
        Self::new(ResponseCache::new(config.cache_ttl, config.cache_max_entries))
    }
}

/// Storefront chatbot.
///
/// Cheap to clone; clones share the same remote clients and context.
#[derive(Clone)]
pub struct ChatbotAI {
    llm: Arc<dyn LanguageModel>,
    store: Arc<dyn VectorStore>,
    classifier: Arc<dyn IntentClassifier>,
    context: Arc<ChatbotContext>,
}

impl ChatbotAI {
    /// Validate credentials and build the OpenAI and Weaviate clients.
    ///
    /// Fails with [`ChatbotError::MissingCredential`](crate::ChatbotError::MissingCredential)
    /// before any client is created.
    pub fn new(config: &ChatbotConfig, context: Arc<ChatbotContext>) -> ChatbotResult<Self> {
        let credentials = config.credentials.validate()?;

        let llm = OpenAIChatModel::new(
            OpenAIConfig::new(credentials.openai_api_key.clone())
                .with_base_url(config.openai_base_url.clone())
                .with_model(config.model.clone())
                .with_temperature(config.temperature)
                .with_timeout(config.request_timeout),
        )?;

        let store = WeaviateClient::new(
            WeaviateConfig::new(&credentials.weaviate_url, credentials.weaviate_api_key)
                .with_openai_api_key(credentials.openai_api_key)
                .with_timeout(config.request_timeout),
        )?;

        info!(model = %config.model, "Chatbot initialised");
        Ok(Self::from_parts(Arc::new(llm), Arc::new(store), context))
    }

    /// Assemble from already-built clients, with the keyword classifier.
    pub fn from_parts(
        llm: Arc<dyn LanguageModel>,
        store: Arc<dyn VectorStore>,
        context: Arc<ChatbotContext>,
    ) -> Self {
        Self {
            llm,
            store,
            classifier: Arc::new(KeywordClassifier::default()),
            context,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn IntentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn context(&self) -> &Arc<ChatbotContext> {
        &self.context
    }

    pub fn vector_store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }

    /// Make sure both collections exist. Runs the remote check at most once
    /// per context after it first succeeds.
    pub async fn ensure_schema(&self) -> ChatbotResult<()> {
        self.context.schema.ensure(self.store.as_ref()).await
    }

    /// Answer one message. Never fails: any error is logged and replaced by
    /// the apology reply with no recommendations.
    #[instrument(skip(self, message, history), fields(history_len = history.len()))]
    pub async fn generate_response(&self, message: &str, history: &[ChatExchange]) -> ChatResponse {
        match self.try_generate_response(message, history).await {
            Ok(response) => response,
            Err(e) => {
                error!(operation = "generate_response", error = %e, "Failed to generate reply");
                ChatResponse::fallback()
            }
        }
    }

    async fn try_generate_response(
        &self,
        message: &str,
        history: &[ChatExchange],
    ) -> ChatbotResult<ChatResponse> {
        let text = self.llm.complete(build_prompt(message, history)).await?;

        let recommendations = if self.classifier.is_product_related(message) {
            self.similar_products(message, DEFAULT_SEARCH_LIMIT).await
        } else {
            Vec::new()
        };

        Ok(ChatResponse {
            message: ChatMessage::bot(text),
            recommendations,
        })
    }

    /// Full inbound flow: bootstrap the schema, load history, answer, and
    /// record the exchange. Requests without a session id are answered
    /// without history and not persisted.
    #[instrument(skip_all, fields(session_id = request.session_id.as_deref().unwrap_or("")))]
    pub async fn chat(
        &self,
        sessions: &dyn ChatSessionRepository,
        request: ChatRequest,
    ) -> ChatbotResult<ChatResponse> {
        request.validate()?;
        self.ensure_schema().await?;

        let session_id = request.session_id.as_deref().filter(|id| !id.trim().is_empty());

        let history = match session_id {
            Some(id) => sessions.get_or_create(id).await?,
            None => Vec::new(),
        };

        let response = self.generate_response(&request.message, &history).await;

        if let Some(id) = session_id {
            sessions
                .append_exchange(
                    id,
                    ChatExchange {
                        user: request.message,
                        assistant: response.message.clone(),
                    },
                )
                .await?;
        }

        Ok(response)
    }

    /// Products closest to `query`, in the store's relevance order.
    #[instrument(skip(self))]
    pub async fn similar_products(&self, query: &str, limit: u32) -> Vec<ProductRecord> {
        let raw = self
            .search(PRODUCT_SEARCH_OP, &CollectionSchema::product(), query, limit)
            .await;
        parse_records(raw, PRODUCT_COLLECTION)
    }

    /// Conversation exemplars closest to `query`.
    #[instrument(skip(self))]
    pub async fn similar_conversations(&self, query: &str, limit: u32) -> Vec<ConversationRecord> {
        let raw = self
            .search(
                CONVERSATION_SEARCH_OP,
                &CollectionSchema::conversation(),
                query,
                limit,
            )
            .await;
        parse_records(raw, CONVERSATION_COLLECTION)
    }

    async fn search(
        &self,
        op: &str,
        schema: &CollectionSchema,
        query: &str,
        limit: u32,
    ) -> Vec<Value> {
        let key = ResponseCache::fingerprint(op, query, limit);
        // An empty list is never served from cache; the store may have been
        // indexed since.
        if let Some(hit) = self.context.cache.get(&key).filter(|hit| !hit.is_empty()) {
            debug!(cache_key = %key, "Similarity search cache hit");
            return hit;
        }

        match self.store.near_text(schema, query, limit).await {
            Ok(results) => {
                if !results.is_empty() {
                    self.context
                        .cache
                        .set(key, results.clone(), self.context.cache.default_ttl());
                }
                results
            }
            Err(e) => {
                error!(
                    operation = "similarity_search",
                    collection = %schema.name,
                    query,
                    limit,
                    error = %e,
                    "Similarity search failed"
                );
                Vec::new()
            }
        }
    }

    /// Validate, fill defaults and store one product. Returns `false` on any
    /// failure.
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    pub async fn index_product(&self, product: ProductInput) -> bool {
        let name = product.name.clone();
        match self.try_index_product(product).await {
            Ok(()) => true,
            Err(e) => {
                error!(operation = "index_product", product_name = %name, error = %e, "Failed to index product");
                false
            }
        }
    }

    async fn try_index_product(&self, product: ProductInput) -> ChatbotResult<()> {
        product.validate()?;
        let record = product.into_record();
        self.store
            .create_object(PRODUCT_COLLECTION, serde_json::to_value(&record)?)
            .await
    }

    /// Index products one at a time; failures are counted and skipped.
    #[instrument(skip_all, fields(total = products.len()))]
    pub async fn index_products_batch(&self, products: Vec<ProductInput>) -> IndexSummary {
        let total = products.len();
        let mut indexed = 0;
        for product in products {
            if self.index_product(product).await {
                indexed += 1;
            }
        }

        info!(indexed, total, "Indexed product batch");
        IndexSummary { indexed, total }
    }

    #[instrument(skip(self, conversation), fields(intent = conversation.intent.as_deref().unwrap_or("")))]
    pub async fn index_conversation(&self, conversation: ConversationInput) -> bool {
        match self.try_index_conversation(conversation).await {
            Ok(()) => true,
            Err(e) => {
                error!(operation = "index_conversation", error = %e, "Failed to index conversation");
                false
            }
        }
    }

    async fn try_index_conversation(&self, conversation: ConversationInput) -> ChatbotResult<()> {
        conversation.validate()?;
        let record = conversation.into_record();
        self.store
            .create_object(CONVERSATION_COLLECTION, serde_json::to_value(&record)?)
            .await
    }

    #[instrument(skip_all, fields(total = conversations.len()))]
    pub async fn index_conversations_batch(
        &self,
        conversations: Vec<ConversationInput>,
    ) -> IndexSummary {
        let total = conversations.len();
        let mut indexed = 0;
        for conversation in conversations {
            if self.index_conversation(conversation).await {
                indexed += 1;
            }
        }

        info!(indexed, total, "Indexed conversation batch");
        IndexSummary { indexed, total }
    }
}

fn parse_records<T: DeserializeOwned>(raw: Vec<Value>, collection: &str) -> Vec<T> {
    raw.into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(collection, error = %e, "Skipping unreadable search result");
                None
            }
        })
        .collect()
}
