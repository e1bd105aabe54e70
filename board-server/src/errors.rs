use thiserror::Error;

use crate::db::DbError;

/// Errors that can occur while starting or running the server
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration error occurred
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error occurred (file operations, listener bind, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Database setup error
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Tracing/logging error
    #[error("Tracing error: {0}")]
    Tracing(String),
}

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

impl From<tracing_subscriber::util::TryInitError> for ServerError {
    fn from(e: tracing_subscriber::util::TryInitError) -> Self {
        ServerError::Tracing(e.to_string())
    }
}
