//! Logger configuration.

use std::time::Duration;

/// Default Amplitude HTTP API v2 endpoint.
pub const DEFAULT_API_URI: &str = "https://api.amplitude.com/2/httpapi";

/// Event logger configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) api_key: String,
    pub(crate) api_uri: String,
    pub(crate) logging: bool,
    pub(crate) timeout: Option<Duration>,
    pub(crate) http_client: Option<reqwest::Client>,
}

impl Config {
    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the endpoint events are posted to.
    pub fn api_uri(&self) -> &str {
        &self.api_uri
    }

    /// Whether logging starts enabled.
    pub fn logging(&self) -> bool {
        self.logging
    }

    /// Get the request timeout, if one was configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Builder for [`EventLogger`](crate::EventLogger).
#[derive(Debug)]
pub struct LoggerBuilder {
    api_key: String,
    api_uri: Option<String>,
    logging: Option<bool>,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
}

impl LoggerBuilder {
    /// Create a new builder with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_uri: None,
            logging: None,
            timeout: None,
            http_client: None,
        }
    }

    /// Override the endpoint events are posted to.
    pub fn api_uri(mut self, uri: impl Into<String>) -> Self {
        self.api_uri = Some(uri.into());
        self
    }

    /// Set whether the logger starts with logging enabled.
    pub fn logging(mut self, enabled: bool) -> Self {
        self.logging = Some(enabled);
        self
    }

    /// Bound each request by a timeout. There is none by default.
    ///
    /// Ignored when a client is supplied with [`http_client`](Self::http_client).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a pre-configured HTTP client instead of building one.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the configuration.
    pub(crate) fn build_config(self) -> Result<Config, crate::Error> {
        if self.api_key.is_empty() {
            return Err(crate::Error::Config("api_key cannot be empty".into()));
        }

        let api_uri = self.api_uri.unwrap_or_else(|| DEFAULT_API_URI.into());
        if api_uri.is_empty() {
            return Err(crate::Error::Config("api_uri cannot be empty".into()));
        }

        Ok(Config {
            api_key: self.api_key,
            api_uri,
            logging: self.logging.unwrap_or(true),
            timeout: self.timeout,
            http_client: self.http_client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = LoggerBuilder::new("key_test").build_config().unwrap();

        assert_eq!(config.api_key(), "key_test");
        assert_eq!(config.api_uri(), DEFAULT_API_URI);
        assert!(config.logging());
        assert_eq!(config.timeout(), None);
        assert!(config.http_client.is_none());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = LoggerBuilder::new("key_test")
            .api_uri("https://custom.example.com/2/httpapi")
            .logging(false)
            .timeout(Duration::from_secs(30))
            .build_config()
            .unwrap();

        assert_eq!(config.api_uri(), "https://custom.example.com/2/httpapi");
        assert!(!config.logging());
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_builder_empty_api_key_fails() {
        let result = LoggerBuilder::new("").build_config();
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_builder_empty_api_uri_fails() {
        let result = LoggerBuilder::new("key_test").api_uri("").build_config();
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }
}
