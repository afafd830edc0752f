// Error type for the API client. Command flows wrap these in `anyhow`
// with extra context; the client itself only ever returns `ApiError`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request could not be built or the network call failed
    /// (DNS, connect, timeout). Never retried.
    #[error("request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server answered with a status outside 2xx. `body` is the full
    /// response text.
    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status for `Api` errors, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
