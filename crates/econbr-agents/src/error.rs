use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Response parse error: {0}")]
    Parse(String),

    #[error("Agent timed out after {0} seconds")]
    Timeout(u64),

    #[error("Agent stopped after {0} iterations without a final answer")]
    IterationLimit(u32),
}
