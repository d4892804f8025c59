//! Error types for the Amplitude logger.

/// Errors that can occur when building or delivering events.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Event fields failed validation.
    #[error("Invalid event: {0}")]
    Validation(String),

    /// Attempted to send a package without events.
    #[error("Cannot send an empty event package")]
    EmptyPackage,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }
}
