use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse};
use std::fmt;
use std::time::Duration;

use crate::error::{ChatbotError, ChatbotResult};

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const WEAVIATE_URL: &str = "WEAVIATE_URL";
pub const WEAVIATE_API_KEY: &str = "WEAVIATE_API_KEY";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1024;

/// Credentials for the two remote services, as found in the environment.
///
/// Nothing is checked when these are loaded; [`Credentials::validate`] runs
/// when the chatbot is constructed.
#[derive(Clone, Default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub weaviate_url: Option<String>,
    pub weaviate_api_key: Option<String>,
}

/// Credentials that passed validation.
#[derive(Clone)]
pub struct ResolvedCredentials {
    pub openai_api_key: String,
    pub weaviate_url: String,
    pub weaviate_api_key: String,
}

impl Credentials {
    pub fn new(
        openai_api_key: impl Into<String>,
        weaviate_url: impl Into<String>,
        weaviate_api_key: impl Into<String>,
    ) -> Self {
        Self {
            openai_api_key: Some(openai_api_key.into()),
            weaviate_url: Some(weaviate_url.into()),
            weaviate_api_key: Some(weaviate_api_key.into()),
        }
    }

    pub fn from_env() -> Self {
        Self {
            openai_api_key: env_optional(OPENAI_API_KEY),
            weaviate_url: env_optional(WEAVIATE_URL),
            weaviate_api_key: env_optional(WEAVIATE_API_KEY),
        }
    }

    /// Fails with the name of the first credential that is missing or blank.
    pub fn validate(&self) -> ChatbotResult<ResolvedCredentials> {
        Ok(ResolvedCredentials {
            openai_api_key: required(OPENAI_API_KEY, &self.openai_api_key)?,
            weaviate_url: required(WEAVIATE_URL, &self.weaviate_url)?,
            weaviate_api_key: required(WEAVIATE_API_KEY, &self.weaviate_api_key)?,
        })
    }
}

fn required(name: &'static str, value: &Option<String>) -> ChatbotResult<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ChatbotError::MissingCredential(name))
}

fn redact(value: &Option<String>) -> &'static str {
    if value.is_some() { "<set>" } else { "<unset>" }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("weaviate_url", &self.weaviate_url)
            .field("weaviate_api_key", &redact(&self.weaviate_api_key))
            .finish()
    }
}

/// Chatbot configuration
#[derive(Debug, Clone)]
pub struct ChatbotConfig {
    pub credentials: Credentials,
    pub openai_base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Request timeout for every outbound HTTP call
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_max_entries: usize,
}

impl ChatbotConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

impl FromEnv for ChatbotConfig {
    /// Reads from environment variables with defaults:
    /// - OPENAI_BASE_URL: https://api.openai.com/v1
    /// - OPENAI_MODEL: gpt-4
    /// - OPENAI_TEMPERATURE: 0.7
    /// - REMOTE_TIMEOUT_SECS: 30
    /// - CHATBOT_CACHE_TTL_SECS: 60
    /// - CHATBOT_CACHE_MAX_ENTRIES: 1024
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            credentials: Credentials::from_env(),
            openai_base_url: env_or_default("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            model: env_or_default("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            temperature: env_parse("OPENAI_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            request_timeout: Duration::from_secs(env_parse(
                "REMOTE_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            cache_ttl: Duration::from_secs(env_parse(
                "CHATBOT_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
            )?),
            cache_max_entries: env_parse("CHATBOT_CACHE_MAX_ENTRIES", DEFAULT_CACHE_MAX_ENTRIES)?,
        })
    }
}
