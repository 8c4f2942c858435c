use crate::{env_optional, ConfigError};

/// Redis configuration
#[derive(Clone, Debug)]
pub struct RedisConfig {
    pub uri: String,
}

impl RedisConfig {
    pub fn new(uri: String) -> Self {
        Self { uri }
    }

    /// Redis is optional for the chatbot: `None` when REDIS_HOST is unset.
    pub fn from_env_optional() -> Result<Option<Self>, ConfigError> {
        Ok(env_optional("REDIS_HOST").map(Self::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redis_config_from_env_present() {
        temp_env::with_var("REDIS_HOST", Some("redis://localhost:6379"), || {
            let config = RedisConfig::from_env_optional().unwrap().unwrap();
            assert_eq!(config.uri, "redis://localhost:6379");
        });
    }

    #[test]
    fn test_redis_config_from_env_missing() {
        temp_env::with_var_unset("REDIS_HOST", || {
            assert!(RedisConfig::from_env_optional().unwrap().is_none());
        });
    }
}
