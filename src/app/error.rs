use thiserror::Error;

/// Why a headline fetch failed.
///
/// The UI treats every variant the same way (generic error view with retry);
/// the distinction exists for logging and for the one-shot CLI.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Unexpected response body: {0}")]
    DecodeFailure(String),
}

#[derive(Error, Debug)]
pub enum NewsError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NewsError>;
