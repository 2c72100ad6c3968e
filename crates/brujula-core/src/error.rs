use thiserror::Error;

/// Errors raised when parsing model enums from user input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown assistant profile: {0}")]
    UnknownProfile(String),

    #[error("unknown suggestion type: {0}")]
    UnknownSuggestionType(String),
}
