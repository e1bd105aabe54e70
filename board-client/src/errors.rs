use thiserror::Error;

/// Errors that can occur in the board client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// IO error occurred (draft file, config file, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config, missing home directory, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP error talking to the job board service
    #[error("HTTP error: {0}")]
    Http(String),

    /// Tracing/logging error
    #[error("Tracing error: {0}")]
    Tracing(String),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<toml::ser::Error> for ClientError {
    fn from(e: toml::ser::Error) -> Self {
        ClientError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(e: toml::de::Error) -> Self {
        ClientError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Serialization(e.to_string())
    }
}
