use thiserror::Error;

/// Why a page of events could not be fetched. Rendered into the `Failed`
/// state as a plain message; none of these abort the session.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid events API url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("events request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("events API returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed events payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("events fetch task aborted: {0}")]
    Aborted(String),
}
