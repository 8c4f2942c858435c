use std::time::Duration;

use crate::config::DEFAULT_TIMEOUT_SECS;

/// Weaviate connection configuration
#[derive(Debug, Clone)]
pub struct WeaviateConfig {
    /// Base URL including scheme; `https://` is assumed when none is given
    pub url: String,
    pub api_key: String,
    /// Forwarded as `X-OpenAI-Api-Key` for the `text2vec-openai` vectorizer
    pub openai_api_key: Option<String>,
    pub timeout: Duration,
}

impl WeaviateConfig {
    pub fn new(url: &str, api_key: String) -> Self {
        Self {
            url: normalize_url(url),
            api_key,
            openai_api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_openai_api_key(mut self, key: String) -> Self {
        self.openai_api_key = Some(key);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn normalize_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
