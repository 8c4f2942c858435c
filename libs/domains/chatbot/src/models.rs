use chrono::Local;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

pub const BOT_SENDER: &str = "bot";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const FALLBACK_REPLY: &str = "I apologize, but I'm having trouble processing your request. Please try again or contact our support team for assistance.";

pub const WELCOME_TEXT: &str = "👋 Welcome to Walknex! I'm your AI shopping assistant.\n\nI can help you:\n• Find the perfect shoes for your needs\n• Get personalized recommendations\n• Track your order or answer FAQs\n\nHow can I assist you today?";

pub const DEFAULT_FEATURES: [&str; 4] = [
    "Responsive cushioning",
    "Breathable mesh upper",
    "Durable rubber outsole",
    "Moisture-wicking lining",
];

pub const DEFAULT_SUITABLE_FOR: [&str; 4] = ["Running", "Walking", "Gym workouts", "Daily wear"];

pub const DEFAULT_FOOT_TYPE: [&str; 3] = ["Neutral", "Medium arch", "Normal pronation"];

/// Default number of results for similarity searches
pub const DEFAULT_SEARCH_LIMIT: u32 = 3;

/// A single chat message as shown in the storefront widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub text: String,
    pub sender: String,
    /// Local time formatted as `%Y-%m-%d %H:%M:%S`; empty for the greeting
    pub timestamp: String,
}

impl ChatMessage {
    /// A bot message stamped with the current local time
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: BOT_SENDER.to_string(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn welcome() -> Self {
        Self {
            text: WELCOME_TEXT.to_string(),
            sender: BOT_SENDER.to_string(),
            timestamp: String::new(),
        }
    }
}

/// One user turn and the assistant reply to it, as persisted in a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatExchange {
    pub user: String,
    pub assistant: ChatMessage,
}

/// Reply to an inbound chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub message: ChatMessage,
    pub recommendations: Vec<ProductRecord>,
}

impl ChatResponse {
    pub fn fallback() -> Self {
        Self {
            message: ChatMessage::bot(FALLBACK_REPLY),
            recommendations: Vec::new(),
        }
    }
}

/// Inbound chat request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChatRequest {
    /// Opaque session key; without it the message is answered statelessly
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub message: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("message must not be blank".into()));
    }
    Ok(())
}

fn or_defaults(values: Option<Vec<String>>, defaults: &[&str]) -> Vec<String> {
    match values {
        Some(v) if !v.is_empty() => v,
        _ => defaults.iter().map(|s| s.to_string()).collect(),
    }
}

/// Product as submitted for indexing. Missing or empty lists get defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in GBP
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    /// Image URL
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub suitable_for: Option<Vec<String>>,
    #[serde(default)]
    pub foot_type: Option<Vec<String>>,
}

impl ProductInput {
    pub fn into_record(self) -> ProductRecord {
        ProductRecord {
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            image: self.image,
            features: or_defaults(self.features, &DEFAULT_FEATURES),
            suitable_for: or_defaults(self.suitable_for, &DEFAULT_SUITABLE_FOR),
            foot_type: or_defaults(self.foot_type, &DEFAULT_FOOT_TYPE),
        }
    }
}

/// Product as stored in and returned by the vector store
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRecord {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub features: Vec<String>,
    pub suitable_for: Vec<String>,
    pub foot_type: Vec<String>,
}

/// Conversation exemplar as submitted for indexing
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationInput {
    #[validate(length(min = 1))]
    pub user_query: String,
    #[validate(length(min = 1))]
    pub assistant_response: String,
    #[serde(default)]
    pub context: Option<Vec<String>>,
    #[serde(default)]
    pub intent: Option<String>,
}

impl ConversationInput {
    pub fn into_record(self) -> ConversationRecord {
        ConversationRecord {
            user_query: self.user_query,
            assistant_response: self.assistant_response,
            context: self.context.unwrap_or_default(),
            intent: self.intent.unwrap_or_default(),
        }
    }
}

/// Conversation exemplar as stored in and returned by the vector store
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationRecord {
    pub user_query: String,
    pub assistant_response: String,
    pub context: Vec<String>,
    pub intent: String,
}

/// Outcome of a batch indexing call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IndexSummary {
    pub indexed: usize,
    pub total: usize,
}

/// Query parameters for similarity endpoints
#[derive(Debug, Clone, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SimilarQuery {
    /// Free-text query
    #[validate(length(min = 1))]
    pub q: String,
    /// Maximum number of results (default 3)
    #[serde(default)]
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_defaults_fill_missing_lists() {
        let input: ProductInput = serde_json::from_value(json!({
            "name": "Air Cloud Runner",
            "price": 129.99,
            "suitableFor": []
        }))
        .unwrap();

        let record = input.into_record();
        assert_eq!(record.features, DEFAULT_FEATURES);
        assert_eq!(record.suitable_for, DEFAULT_SUITABLE_FOR);
        assert_eq!(record.foot_type, DEFAULT_FOOT_TYPE);
    }

    #[test]
    fn test_product_keeps_supplied_lists() {
        let input = ProductInput {
            name: "Trail Blazer Pro".to_string(),
            price: 189.99,
            foot_type: Some(vec!["Wide".to_string()]),
            ..Default::default()
        };
        assert_eq!(input.into_record().foot_type, vec!["Wide".to_string()]);
    }

    #[test]
    fn test_product_record_serializes_camel_case() {
        let record = ProductInput {
            name: "Street Force One".to_string(),
            price: 149.99,
            ..Default::default()
        }
        .into_record();
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("suitableFor").is_some());
        assert!(value.get("footType").is_some());
        assert!(value.get("suitable_for").is_none());
    }

    #[test]
    fn test_product_validation_rejects_negative_price() {
        let input = ProductInput {
            name: "Broken".to_string(),
            price: -1.0,
            ..Default::default()
        };
        assert!(input.validate().is_err());

        let free = ProductInput {
            name: "Sample".to_string(),
            price: 0.0,
            ..Default::default()
        };
        assert!(free.validate().is_ok());
    }

    #[test]
    fn test_product_record_parses_partial_store_objects() {
        let record: ProductRecord =
            serde_json::from_value(json!({"name": "Air Cloud Runner", "price": 129.99})).unwrap();
        assert_eq!(record.name, "Air Cloud Runner");
        assert!(record.features.is_empty());
    }

    #[test]
    fn test_conversation_intent_defaults_to_empty() {
        let input: ConversationInput = serde_json::from_value(json!({
            "userQuery": "Do you ship to Ireland?",
            "assistantResponse": "Yes, we ship across the UK and Ireland."
        }))
        .unwrap();
        let record = input.into_record();
        assert_eq!(record.intent, "");
        assert!(record.context.is_empty());
    }

    #[test]
    fn test_chat_request_rejects_blank_message() {
        let request: ChatRequest = serde_json::from_value(json!({"message": "   "})).unwrap();
        assert!(request.validate().is_err());

        let missing: ChatRequest = serde_json::from_value(json!({"session_id": "abc"})).unwrap();
        assert!(missing.validate().is_err());
    }

    #[test]
    fn test_bot_message_timestamp_format() {
        let message = ChatMessage::bot("hello");
        assert_eq!(message.sender, "bot");
        assert!(chrono::NaiveDateTime::parse_from_str(&message.timestamp, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_welcome_message_has_empty_timestamp() {
        let welcome = ChatMessage::welcome();
        assert!(welcome.text.starts_with("👋 Welcome to Walknex!"));
        assert_eq!(welcome.timestamp, "");
    }
}
