//! Client configuration

use std::time::Duration;

use crate::{ClientError, ClientResult};

/// Default request timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Client configuration for the conference API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:3000/api")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// | Key | Default |
    /// |-----|---------|
    /// | API_BASE_URL | (required) |
    /// | API_TIMEOUT_MS | 10000 |
    /// | API_TOKEN | (unset) |
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("API_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ClientError::Config("API_BASE_URL is not set".into()))?;

        let mut config = Self::new(base_url);
        if let Some(value) = lookup("API_TIMEOUT_MS") {
            let timeout_ms = value
                .trim()
                .parse()
                .map_err(|_| ClientError::Config(format!("invalid API_TIMEOUT_MS: {}", value)))?;
            config = config.with_timeout_ms(timeout_ms);
        }
        if let Some(token) = lookup("API_TOKEN")
            && !token.trim().is_empty()
        {
            config = config.with_token(token);
        }
        Ok(config)
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://localhost:3000/api")
            .with_token("abc")
            .with_timeout_ms(500);
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout(), Duration::from_millis(500));
        assert_eq!(ClientConfig::new("x").timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_from_lookup() {
        let config = ClientConfig::from_lookup(|key| match key {
            "API_BASE_URL" => Some("http://api.local/api".into()),
            "API_TIMEOUT_MS" => Some("2500".into()),
            "API_TOKEN" => Some("  ".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url, "http://api.local/api");
        assert_eq!(config.timeout_ms, 2500);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_from_lookup_errors() {
        let err = ClientConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        assert_eq!(err.code(), shared::error::ErrorCode::ConfigError);

        let err = ClientConfig::from_lookup(|key| match key {
            "API_BASE_URL" => Some("http://api.local".into()),
            "API_TIMEOUT_MS" => Some("soon".into()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, ClientError::Config(msg) if msg.contains("API_TIMEOUT_MS")));
    }
}
