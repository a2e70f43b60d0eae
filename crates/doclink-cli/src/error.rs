//! Error types for doclink-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from doclink-core
    #[error(transparent)]
    Core(#[from] doclink_core::Error),

    /// Error from doclink-api
    #[error(transparent)]
    Api(#[from] doclink_api::Error),

    /// Report serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Missing or inconsistent settings, detected before any network call
    #[error("{message}")]
    Config { message: String },
}

impl CliError {
    /// Create a configuration error with the given message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
