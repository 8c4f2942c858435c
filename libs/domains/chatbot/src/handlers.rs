//! HTTP handlers for the chatbot API

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use axum_helpers::{
    JsonBody, ValidatedJson,
    errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;
use validator::Validate;

use crate::error::ChatbotResult;
use crate::models::{
    ChatExchange, ChatMessage, ChatRequest, ChatResponse, ConversationInput, ConversationRecord,
    DEFAULT_SEARCH_LIMIT, IndexSummary, ProductInput, ProductRecord, SimilarQuery,
};
use crate::service::ChatbotAI;
use crate::session::ChatSessionRepository;

/// OpenAPI documentation for the chatbot API
#[derive(OpenApi)]
#[openapi(
    paths(
        chat,
        welcome,
        similar_products,
        similar_conversations,
        index_products,
        index_conversations,
    ),
    components(
        schemas(
            ChatRequest, ChatResponse, ChatMessage, ChatExchange,
            ProductInput, ProductRecord, ConversationInput, ConversationRecord,
            IndexSummary
        ),
        responses(BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Chatbot", description = "Storefront shopping assistant")
    )
)]
pub struct ApiDoc;

struct ChatbotState {
    chatbot: ChatbotAI,
    sessions: Arc<dyn ChatSessionRepository>,
}

/// Path the chatbot routes are served under, relative to the API root
pub const MOUNT_PATH: &str = "/chatbot";

fn routes() -> Router<Arc<ChatbotState>> {
    Router::new()
        .route("/", post(chat))
        .route("/welcome", get(welcome))
        .route("/products/similar", get(similar_products))
        .route("/conversations/similar", get(similar_conversations))
        .route("/index/products", post(index_products))
        .route("/index/conversations", post(index_conversations))
}

/// Create the chatbot router with routes relative to its own root
pub fn router(chatbot: ChatbotAI, sessions: Arc<dyn ChatSessionRepository>) -> Router {
    routes().with_state(Arc::new(ChatbotState { chatbot, sessions }))
}

/// Create the chatbot router already mounted at [`MOUNT_PATH`].
///
/// A nested `/` only matches the bare prefix, so the chat endpoint is also
/// registered with the trailing slash that storefront clients post to.
pub fn mounted_router(chatbot: ChatbotAI, sessions: Arc<dyn ChatSessionRepository>) -> Router {
    Router::new()
        .route(&format!("{MOUNT_PATH}/"), post(chat))
        .nest(MOUNT_PATH, routes())
        .with_state(Arc::new(ChatbotState { chatbot, sessions }))
}

/// Send a message to the assistant
#[utoipa::path(
    post,
    path = "/",
    tag = "Chatbot",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply with optional recommendations", body = ChatResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn chat(
    State(state): State<Arc<ChatbotState>>,
    ValidatedJson(request): ValidatedJson<ChatRequest>,
) -> ChatbotResult<Json<ChatResponse>> {
    let response = state.chatbot.chat(state.sessions.as_ref(), request).await?;
    Ok(Json(response))
}

/// Greeting shown when the chat window opens
#[utoipa::path(
    get,
    path = "/welcome",
    tag = "Chatbot",
    responses(
        (status = 200, description = "Welcome message", body = ChatMessage)
    )
)]
async fn welcome() -> Json<ChatMessage> {
    Json(ChatMessage::welcome())
}

/// Products semantically closest to a query
#[utoipa::path(
    get,
    path = "/products/similar",
    tag = "Chatbot",
    params(SimilarQuery),
    responses(
        (status = 200, description = "Matching products, most relevant first", body = Vec<ProductRecord>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn similar_products(
    State(state): State<Arc<ChatbotState>>,
    Query(query): Query<SimilarQuery>,
) -> ChatbotResult<Json<Vec<ProductRecord>>> {
    query.validate()?;
    state.chatbot.ensure_schema().await?;
    let limit = query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    Ok(Json(state.chatbot.similar_products(&query.q, limit).await))
}

/// Conversation exemplars semantically closest to a query
#[utoipa::path(
    get,
    path = "/conversations/similar",
    tag = "Chatbot",
    params(SimilarQuery),
    responses(
        (status = 200, description = "Matching conversations, most relevant first", body = Vec<ConversationRecord>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn similar_conversations(
    State(state): State<Arc<ChatbotState>>,
    Query(query): Query<SimilarQuery>,
) -> ChatbotResult<Json<Vec<ConversationRecord>>> {
    query.validate()?;
    state.chatbot.ensure_schema().await?;
    let limit = query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    Ok(Json(state.chatbot.similar_conversations(&query.q, limit).await))
}

/// Index a batch of products. Items that fail are skipped and not counted.
#[utoipa::path(
    post,
    path = "/index/products",
    tag = "Chatbot",
    request_body = Vec<ProductInput>,
    responses(
        (status = 200, description = "Batch outcome", body = IndexSummary),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn index_products(
    State(state): State<Arc<ChatbotState>>,
    JsonBody(products): JsonBody<Vec<ProductInput>>,
) -> ChatbotResult<Json<IndexSummary>> {
    state.chatbot.ensure_schema().await?;
    Ok(Json(state.chatbot.index_products_batch(products).await))
}

/// Index a batch of conversation exemplars
#[utoipa::path(
    post,
    path = "/index/conversations",
    tag = "Chatbot",
    request_body = Vec<ConversationInput>,
    responses(
        (status = 200, description = "Batch outcome", body = IndexSummary),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn index_conversations(
    State(state): State<Arc<ChatbotState>>,
    JsonBody(conversations): JsonBody<Vec<ConversationInput>>,
) -> ChatbotResult<Json<IndexSummary>> {
    state.chatbot.ensure_schema().await?;
    Ok(Json(state.chatbot.index_conversations_batch(conversations).await))
}
