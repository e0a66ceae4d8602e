use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Tool timed out after {0} seconds")]
    Timeout(u64),

    #[error("Sandbox error: {0}")]
    Sandbox(String),

    #[error("Invalid response from upstream: {0}")]
    InvalidResponse(String),
}
