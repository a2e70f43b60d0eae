//! Error types for doclink-api

use std::path::PathBuf;

/// Result type for doclink-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the remote API
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}: {body}")]
    Http {
        url: String,
        status: u16,
        body: String,
    },

    /// The request could not be sent or the response could not be read
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not the expected JSON shape
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL {url}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Only one half of the client certificate/key pair was supplied
    #[error("Client certificate and client key must be supplied together")]
    IncompleteIdentity,

    #[error("Failed to load client identity from {path}: {message}")]
    Identity { path: PathBuf, message: String },

    #[error("API token is not a valid header value")]
    InvalidToken,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl Error {
    /// HTTP status of a failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
