use thiserror::Error;

/// Errors from content generation and the assistant
#[derive(Error, Debug)]
pub enum AiError {
    #[error("service unavailable")]
    Unavailable,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("suggestion not found: {0}")]
    SuggestionNotFound(String),

    #[error("suggestion has no action: {0}")]
    NoAction(String),
}

pub type AiResult<T> = std::result::Result<T, AiError>;
