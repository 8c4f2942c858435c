use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use super::WeaviateConfig;
use crate::error::{ChatbotError, ChatbotResult};
use crate::schema::CollectionSchema;
use crate::vector_store::VectorStore;

/// Weaviate REST/GraphQL implementation of [`VectorStore`]
pub struct WeaviateClient {
    client: Client,
    config: WeaviateConfig,
}

#[derive(Debug, Deserialize)]
struct SchemaResponse {
    #[serde(default)]
    classes: Option<Vec<ClassEntry>>,
}

#[derive(Debug, Deserialize)]
struct ClassEntry {
    class: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl WeaviateClient {
    pub fn new(config: WeaviateConfig) -> ChatbotResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChatbotError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.config.url, path))
            .header("Authorization", format!("Bearer {}", self.config.api_key));

        match &self.config.openai_api_key {
            Some(key) => builder.header("X-OpenAI-Api-Key", key),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, operation: &str) -> ChatbotResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| ChatbotError::VectorStore(format!("{} failed: {}", operation, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ChatbotError::VectorStore(format!(
                "{} returned {}: {}",
                operation, status, error_text
            )));
        }

        Ok(response)
    }

    /// `{ Get { Class(nearText: {concepts: ["q"]}, limit: n) { fields } } }`
    fn near_text_query(schema: &CollectionSchema, query: &str, limit: u32) -> ChatbotResult<String> {
        let concept = serde_json::to_string(query)?;
        let fields = schema.field_names().collect::<Vec<_>>().join(" ");

        Ok(format!(
            "{{ Get {{ {}(nearText: {{concepts: [{}]}}, limit: {}) {{ {} }} }} }}",
            schema.name, concept, limit, fields
        ))
    }
}

#[async_trait]
impl VectorStore for WeaviateClient {
    async fn list_collections(&self) -> ChatbotResult<Vec<String>> {
        let response = self
            .send(self.request(Method::GET, "/v1/schema"), "list schema")
            .await?;

        let schema: SchemaResponse = response
            .json()
            .await
            .map_err(|e| ChatbotError::VectorStore(format!("Invalid schema response: {}", e)))?;

        Ok(schema
            .classes
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.class)
            .collect())
    }

    async fn create_collection(&self, schema: &CollectionSchema) -> ChatbotResult<()> {
        self.send(
            self.request(Method::POST, "/v1/schema").json(schema),
            "create class",
        )
        .await?;
        Ok(())
    }

    async fn create_object(&self, collection: &str, properties: Value) -> ChatbotResult<()> {
        let body = json!({
            "class": collection,
            "properties": properties,
        });

        self.send(
            self.request(Method::POST, "/v1/objects").json(&body),
            "create object",
        )
        .await?;
        Ok(())
    }

    async fn near_text(
        &self,
        schema: &CollectionSchema,
        query: &str,
        limit: u32,
    ) -> ChatbotResult<Vec<Value>> {
        let graphql = Self::near_text_query(schema, query, limit)?;
        debug!(collection = %schema.name, limit, "Running nearText query");

        let response = self
            .send(
                self.request(Method::POST, "/v1/graphql")
                    .json(&json!({ "query": graphql })),
                "nearText query",
            )
            .await?;

        let body: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| ChatbotError::VectorStore(format!("Invalid GraphQL response: {}", e)))?;

        if let Some(errors) = body.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(ChatbotError::VectorStore(format!(
                "GraphQL errors: {}",
                messages.join("; ")
            )));
        }

        let objects = body
            .data
            .and_then(|mut data| data.pointer_mut(&format!("/Get/{}", schema.name)).map(Value::take))
            .unwrap_or(Value::Null);

        match objects {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(ChatbotError::VectorStore(format!(
                "Unexpected nearText result shape: {}",
                other
            ))),
        }
    }
}
