use thiserror::Error;

/// Failures at the completion boundary.
///
/// Callers surface all of these to guests as the same generic message; the
/// variants exist so the server log records what actually went wrong.
#[derive(Debug, Error)]
pub enum AiError {
    /// No API key is configured for the backend.
    #[error("completion client is not configured")]
    NotConfigured,

    /// The upstream service answered with a non-success status.
    #[error("upstream returned status {status}")]
    Upstream { status: u16, body: String },

    /// The request never completed (connect, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response that does not carry usable text.
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

pub type AiResult<T> = Result<T, AiError>;
