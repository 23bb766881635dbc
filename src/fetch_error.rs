#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Upstream returned status {0}")]
    Status(u16),
    #[error("Failed to parse histogram response: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),
}
