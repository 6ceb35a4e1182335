use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RolecheckError {
    #[error("LLM provider failed: {0}")]
    LlmProvider(String),
    #[error("Provider '{provider}' requires an API key")]
    MissingApiKey { provider: String },
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
    #[error("Parsing failed on output '{output}': {reason}")]
    ParseFailed { output: String, reason: String },
    #[error("Max retries ({max}) exceeded: {last_error}")]
    MaxRetriesExceeded { max: usize, last_error: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization/deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
