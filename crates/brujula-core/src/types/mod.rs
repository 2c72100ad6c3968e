pub mod context;
pub mod message;
pub mod profile;
pub mod suggestion;

pub use context::{
    ConversationHistory, ConversationHistoryEntry, UserContext, UserContextPatch, MAX_RECENT_TOPICS,
};
pub use message::{last_user_message, Message, MessageId, Role};
pub use profile::AssistantProfile;
pub use suggestion::{Suggestion, SuggestionAction, SuggestionType, MAX_SUGGESTIONS};
