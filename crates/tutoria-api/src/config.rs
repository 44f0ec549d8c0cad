//! API configuration.

use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY environment variable is not set")]
    MissingApiKey,
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Max request body size
    pub max_body_size: usize,
    /// Gemini API key
    pub gemini_api_key: String,
    /// Gemini model name
    pub gemini_model: String,
}

impl ApiConfig {
    /// Create config from environment variables.
    ///
    /// Fails when `GEMINI_API_KEY` is absent; every other variable has a
    /// default. The key is never logged.
    pub fn from_env() -> Result<Self, ConfigError> {
        let gemini_api_key =
            std::env::var("GEMINI_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;

        Ok(Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5000),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024),
            gemini_api_key,
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash-latest".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-global, so both the missing-key
    // and the defaults case live in one test.
    #[test]
    fn test_from_env_requires_key_and_applies_defaults() {
        std::env::remove_var("GEMINI_API_KEY");
        assert!(matches!(
            ApiConfig::from_env(),
            Err(ConfigError::MissingApiKey)
        ));

        std::env::set_var("GEMINI_API_KEY", "test-key");
        std::env::remove_var("API_HOST");
        std::env::remove_var("API_PORT");
        std::env::remove_var("CORS_ORIGINS");
        std::env::remove_var("MAX_BODY_SIZE");
        std::env::remove_var("GEMINI_MODEL");

        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
        assert_eq!(config.max_body_size, 1024 * 1024);
        assert_eq!(config.gemini_api_key, "test-key");
        assert_eq!(config.gemini_model, "gemini-1.5-flash-latest");

        std::env::remove_var("GEMINI_API_KEY");
    }
}
