use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {0}: {1}")]
    Http(u16, String),

    #[error("Invalid IPFS locator: {0}")]
    InvalidLocator(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}
