//! Chatbot Domain
//!
//! Walknex storefront shopping assistant: answers customer messages with an
//! OpenAI chat model and attaches product recommendations found by semantic
//! search in Weaviate.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌──────────────┐
//! │  ChatbotAI  │ ──► │   Sessions   │  ← chat history (memory or Redis)
//! └──────┬──────┘     └──────────────┘
//!        │
//!   ┌────┴────────────────┐
//!   │                     │
//! ┌─▼─────────────┐ ┌─────▼───────┐
//! │ LanguageModel │ │ VectorStore │  ← OpenAI / Weaviate, behind traits
//! └───────────────┘ └─────────────┘
//! ```
//!
//! Cache and schema bootstrap state live in a [`ChatbotContext`] shared by
//! every clone of [`ChatbotAI`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use core_config::FromEnv;
//! use domain_chatbot::{
//!     ChatbotAI, ChatbotConfig, ChatbotContext, InMemoryChatSessionRepository, handlers,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ChatbotConfig::from_env()?;
//! let context = Arc::new(ChatbotContext::from_config(&config));
//! let chatbot = ChatbotAI::new(&config, context)?;
//!
//! let router = handlers::router(chatbot, Arc::new(InMemoryChatSessionRepository::new()));
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod intent;
pub mod llm;
pub mod models;
pub mod prompt;
pub mod schema;
pub mod service;
pub mod session;
pub mod vector_store;
pub mod weaviate;

pub use cache::ResponseCache;
pub use config::{ChatbotConfig, Credentials};
pub use error::{ChatbotError, ChatbotResult};
pub use handlers::ApiDoc;
pub use intent::{IntentClassifier, KeywordClassifier};
pub use llm::{ChatPrompt, LanguageModel, OpenAIChatModel};
pub use models::{
    ChatExchange, ChatMessage, ChatRequest, ChatResponse, ConversationInput, ConversationRecord,
    IndexSummary, ProductInput, ProductRecord,
};
pub use schema::{CollectionSchema, SchemaBootstrapper};
pub use service::{ChatbotAI, ChatbotContext};
pub use session::{ChatSessionRepository, InMemoryChatSessionRepository, RedisChatSessionRepository};
pub use vector_store::VectorStore;
pub use weaviate::WeaviateClient;
