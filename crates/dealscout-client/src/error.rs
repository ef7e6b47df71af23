//! Client error types for the DealScout API

/// Errors that can occur while talking to the DealScout backend
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl ClientError {
    /// Whether the backend answered at all (as opposed to a transport failure)
    pub fn is_server_response(&self) -> bool {
        matches!(self, ClientError::RequestFailed { .. })
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
