//! Error types for rastgele-core

use thiserror::Error;

/// Result type alias using rastgele-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rastgele-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The embedded page reference is not available yet
    #[error("Embedded page is not ready")]
    PageNotReady,

    /// A selector matched nothing in the current page
    #[error("Target element missing: {0}")]
    TargetMissing(String),

    /// Script dispatch into the embedded page failed
    #[error("Script error: {0}")]
    Script(String),

    /// Remote endpoint answered with a non-success status
    #[error("Request failed with HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Transport-level request failure
    #[error("Request error: {0}")]
    Request(String),

    /// Response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A required response field is absent or unusable
    #[error("Response is missing field `{0}`")]
    MissingField(&'static str),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Request(error.to_string())
        }
    }
}
