use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::error::ChatbotResult;
use crate::vector_store::VectorStore;

pub const PRODUCT_COLLECTION: &str = "Product";
pub const CONVERSATION_COLLECTION: &str = "Conversation";
pub const VECTORIZER: &str = "text2vec-openai";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DataType {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "text[]")]
    TextArray,
    #[serde(rename = "number")]
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PropertySchema {
    pub name: String,
    #[serde(rename = "dataType")]
    pub data_type: Vec<DataType>,
}

impl PropertySchema {
    fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type: vec![data_type],
        }
    }
}

/// Collection (Weaviate class) definition, serialized in the shape
/// `POST /v1/schema` expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CollectionSchema {
    #[serde(rename = "class")]
    pub name: String,
    pub description: String,
    pub vectorizer: String,
    pub properties: Vec<PropertySchema>,
}

impl CollectionSchema {
    pub fn product() -> Self {
        use DataType::*;
        Self {
            name: PRODUCT_COLLECTION.to_string(),
            description: "Product information for shoes".to_string(),
            vectorizer: VECTORIZER.to_string(),
            properties: vec![
                PropertySchema::new("name", Text),
                PropertySchema::new("description", Text),
                PropertySchema::new("price", Number),
                PropertySchema::new("category", Text),
                PropertySchema::new("image", Text),
                PropertySchema::new("features", TextArray),
                PropertySchema::new("suitableFor", TextArray),
                PropertySchema::new("footType", TextArray),
            ],
        }
    }

    pub fn conversation() -> Self {
        use DataType::*;
        Self {
            name: CONVERSATION_COLLECTION.to_string(),
            description: "Training data for conversation responses".to_string(),
            vectorizer: VECTORIZER.to_string(),
            properties: vec![
                PropertySchema::new("userQuery", Text),
                PropertySchema::new("assistantResponse", Text),
                PropertySchema::new("context", TextArray),
                PropertySchema::new("intent", Text),
            ],
        }
    }

    /// Every collection the chatbot needs, in creation order
    pub fn required() -> [Self; 2] {
        [Self::product(), Self::conversation()]
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BootstrapState {
    Unchecked,
    Checked,
}

/// Run-once guard for collection creation.
///
/// The lock is held across the whole list/create sequence so concurrent
/// callers wait for the first one instead of racing it. A failure leaves the
/// state `Unchecked` and the next call starts over.
#[derive(Debug)]
pub struct SchemaBootstrapper {
    state: Mutex<BootstrapState>,
}

impl SchemaBootstrapper {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BootstrapState::Unchecked),
        }
    }

    pub async fn is_checked(&self) -> bool {
        *self.state.lock().await == BootstrapState::Checked
    }

    #[instrument(skip_all)]
    pub async fn ensure(&self, store: &dyn VectorStore) -> ChatbotResult<()> {
        let mut state = self.state.lock().await;
        if *state == BootstrapState::Checked {
            return Ok(());
        }

        let existing = store.list_collections().await?;

        for schema in CollectionSchema::required() {
            if existing.iter().any(|name| name == &schema.name) {
                continue;
            }
            store.create_collection(&schema).await?;
            info!(collection = %schema.name, "Created vector store collection");
        }

        *state = BootstrapState::Checked;
        Ok(())
    }
}

impl Default for SchemaBootstrapper {
    fn default() -> Self {
        Self::new()
    }
}
