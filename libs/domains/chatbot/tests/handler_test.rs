//! Handler tests for the chatbot domain
//!
//! These drive the router with in-process fakes for the language model and
//! the vector store, so they cover:
//! - Request validation and status codes
//! - Response shape
//! - Session history persistence
//! - Schema bootstrap before first use

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_chatbot::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // For oneshot()

struct EchoModel;

#[async_trait]
impl LanguageModel for EchoModel {
    async fn complete(&self, prompt: ChatPrompt) -> ChatbotResult<String> {
        Ok(format!("You said: {}", prompt.user))
    }
}

#[derive(Default)]
struct FakeStore {
    fail_schema: bool,
    collections: Mutex<Vec<String>>,
    objects: Mutex<Vec<(String, Value)>>,
    searches: AtomicUsize,
}

impl FakeStore {
    fn unreachable() -> Self {
        Self {
            fail_schema: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl VectorStore for FakeStore {
    async fn list_collections(&self) -> ChatbotResult<Vec<String>> {
        if self.fail_schema {
            return Err(ChatbotError::VectorStore("connection refused".to_string()));
        }
        Ok(self.collections.lock().unwrap().clone())
    }

    async fn create_collection(&self, schema: &CollectionSchema) -> ChatbotResult<()> {
        self.collections.lock().unwrap().push(schema.name.clone());
        Ok(())
    }

    async fn create_object(&self, collection: &str, properties: Value) -> ChatbotResult<()> {
        if properties["name"] == "Broken" {
            return Err(ChatbotError::VectorStore("rejected".to_string()));
        }
        self.objects
            .lock()
            .unwrap()
            .push((collection.to_string(), properties));
        Ok(())
    }

    async fn near_text(
        &self,
        schema: &CollectionSchema,
        _query: &str,
        limit: u32,
    ) -> ChatbotResult<Vec<Value>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        let item = match schema.name.as_str() {
            "Product" => json!({
                "name": "Air Cloud Runner",
                "description": "Lightweight daily trainer",
                "price": 129.99,
                "category": "running",
                "image": "https://cdn.walknex.test/air-cloud.jpg",
                "features": ["Breathable mesh"],
                "suitableFor": ["Running"],
                "footType": ["Neutral"]
            }),
            _ => json!({
                "userQuery": "How do returns work?",
                "assistantResponse": "You have 30 days.",
                "context": [],
                "intent": "returns"
            }),
        };
        Ok(vec![item; limit.min(2) as usize])
    }
}

struct TestApp {
    router: Router,
    store: Arc<FakeStore>,
    sessions: Arc<InMemoryChatSessionRepository>,
}

fn test_app(store: FakeStore) -> TestApp {
    let store = Arc::new(store);
    let sessions = Arc::new(InMemoryChatSessionRepository::new());
    let chatbot = ChatbotAI::from_parts(
        Arc::new(EchoModel),
        store.clone(),
        Arc::new(ChatbotContext::default()),
    );
    TestApp {
        router: handlers::router(chatbot, sessions.clone()),
        store,
        sessions,
    }
}

// Router as the API server mounts it, under `/api`
fn mounted_app(store: FakeStore) -> Router {
    let chatbot = ChatbotAI::from_parts(
        Arc::new(EchoModel),
        Arc::new(store),
        Arc::new(ChatbotContext::default()),
    );
    let sessions = Arc::new(InMemoryChatSessionRepository::new());
    Router::new().nest("/api", handlers::mounted_router(chatbot, sessions))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_chat_returns_reply_with_recommendations() {
    let app = test_app(FakeStore::default());

    let response = app
        .router
        .oneshot(post_json("/", json!({"message": "I need running shoes"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"]["text"], "You said: I need running shoes");
    assert_eq!(body["message"]["sender"], "bot");
    assert!(body["message"]["timestamp"].is_string());
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 2);
    assert_eq!(body["recommendations"][0]["suitableFor"][0], "Running");

    // Both collections were bootstrapped on first use.
    let collections = app.store.collections.lock().unwrap().clone();
    assert_eq!(collections, vec!["Product", "Conversation"]);
}

#[tokio::test]
async fn test_chat_small_talk_has_no_recommendations() {
    let app = test_app(FakeStore::default());

    let response = app
        .router
        .oneshot(post_json("/", json!({"message": "hello"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: ChatResponse = json_body(response.into_body()).await;
    assert!(body.recommendations.is_empty());
    assert_eq!(app.store.searches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_chat_accepts_trailing_slash_when_mounted() {
    let router = mounted_app(FakeStore::default());

    for uri in ["/api/chatbot/", "/api/chatbot"] {
        let response = router
            .clone()
            .oneshot(post_json(uri, json!({"message": "hello"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "POST {uri}");
        let body: ChatResponse = json_body(response.into_body()).await;
        assert_eq!(body.message.text, "You said: hello");
    }

    let response = router.oneshot(get("/api/chatbot/welcome")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_chat_rejects_blank_message() {
    let app = test_app(FakeStore::default());

    let response = app
        .router
        .oneshot(post_json("/", json!({"message": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_chat_rejects_missing_message() {
    let app = test_app(FakeStore::default());

    let response = app
        .router
        .oneshot(post_json("/", json!({"session_id": "abc"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_records_history_per_session() {
    let app = test_app(FakeStore::default());

    for message in ["hello", "any walking boots?"] {
        let response = app
            .router
            .clone()
            .oneshot(post_json("/", json!({"session_id": "s-1", "message": message})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let history = app.sessions.get_or_create("s-1").await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].user, "hello");
    assert_eq!(history[1].assistant.text, "You said: any walking boots?");
    assert!(app.sessions.get_or_create("other").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_returns_500_when_schema_bootstrap_fails() {
    let app = test_app(FakeStore::unreachable());

    let response = app
        .router
        .oneshot(post_json("/", json!({"message": "hello"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert!(!body["message"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_welcome_message() {
    let app = test_app(FakeStore::default());

    let response = app.router.oneshot(get("/welcome")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let message: ChatMessage = json_body(response.into_body()).await;
    assert!(message.text.starts_with("👋 Welcome to Walknex!"));
    assert_eq!(message.sender, "bot");
}

#[tokio::test]
async fn test_similar_products_is_cached() {
    let app = test_app(FakeStore::default());

    for _ in 0..2 {
        let response = app
            .router
            .clone()
            .oneshot(get("/products/similar?q=trail%20boots&limit=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let products: Vec<ProductRecord> = json_body(response.into_body()).await;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Air Cloud Runner");
    }

    assert_eq!(app.store.searches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_similar_conversations_default_limit() {
    let app = test_app(FakeStore::default());

    let response = app
        .router
        .oneshot(get("/conversations/similar?q=returns"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let conversations: Vec<ConversationRecord> = json_body(response.into_body()).await;
    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[0].intent, "returns");
}

#[tokio::test]
async fn test_similar_rejects_zero_limit() {
    let app = test_app(FakeStore::default());

    let response = app
        .router
        .oneshot(get("/products/similar?q=boots&limit=0"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_index_products_reports_partial_success() {
    let app = test_app(FakeStore::default());

    let response = app
        .router
        .oneshot(post_json(
            "/index/products",
            json!([
                {"name": "Air Cloud Runner", "price": 129.99, "category": "running"},
                {"name": "Broken", "price": 10.0},
                {"name": "Trail Blazer Pro", "price": 149.99, "features": ["Waterproof"]}
            ]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let summary: IndexSummary = json_body(response.into_body()).await;
    assert_eq!(summary, IndexSummary { indexed: 2, total: 3 });

    let objects = app.store.objects.lock().unwrap();
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0].0, "Product");
    assert_eq!(objects[0].1["features"].as_array().unwrap().len(), 4);
    assert_eq!(objects[1].1["features"], json!(["Waterproof"]));
}

#[tokio::test]
async fn test_index_conversations() {
    let app = test_app(FakeStore::default());

    let response = app
        .router
        .oneshot(post_json(
            "/index/conversations",
            json!([{
                "userQuery": "Do you deliver to Scotland?",
                "assistantResponse": "Yes, across the UK.",
                "intent": "delivery"
            }]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let summary: IndexSummary = json_body(response.into_body()).await;
    assert_eq!(summary, IndexSummary { indexed: 1, total: 1 });
    assert_eq!(app.store.objects.lock().unwrap()[0].0, "Conversation");
}

#[tokio::test]
async fn test_index_products_rejects_malformed_body() {
    let app = test_app(FakeStore::default());

    let request = Request::builder()
        .method("POST")
        .uri("/index/products")
        .header("content-type", "application/json")
        .body(Body::from("[{\"name\": \"Air Cloud Runner\""))
        .unwrap();
    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
    assert!(app.store.objects.lock().unwrap().is_empty());
}
