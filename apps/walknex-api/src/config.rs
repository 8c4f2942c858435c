//! Configuration for Walknex API

use core_config::redis::RedisConfig;
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_chatbot::ChatbotConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub chatbot: ChatbotConfig,
    /// Session store; in-memory when unset
    pub redis: Option<RedisConfig>,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            chatbot: ChatbotConfig::from_env()?,
            redis: RedisConfig::from_env_optional()?,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}
