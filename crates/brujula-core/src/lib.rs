//! Data model shared by the Brújula proactive engine, the assistant layer
//! and the CLI.

pub mod error;
pub mod types;

pub use error::ParseError;
pub use types::{
    last_user_message, AssistantProfile, ConversationHistory, ConversationHistoryEntry, Message,
    MessageId, Role, Suggestion, SuggestionAction, SuggestionType, UserContext, UserContextPatch,
    MAX_RECENT_TOPICS, MAX_SUGGESTIONS,
};
