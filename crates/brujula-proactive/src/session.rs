use std::collections::BTreeSet;

use brujula_core::{ConversationHistory, Message, Role, Suggestion, UserContext};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::generator::SuggestionGenerator;
use crate::settings::EngineSettings;
use crate::store::ContextStore;

/// Persistable part of a session. Messages are session-scoped and are not
/// part of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSnapshot {
    pub session_id: String,
    pub user_context: UserContext,
    #[serde(default)]
    pub conversation_history: ConversationHistory,
    #[serde(default)]
    pub dismissed_suggestions: BTreeSet<String>,
    pub updated_at: DateTime<Utc>,
}

impl ContextSnapshot {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_context: UserContext::default(),
            conversation_history: ConversationHistory::new(),
            dismissed_suggestions: BTreeSet::new(),
            updated_at: Utc::now(),
        }
    }
}

/// One chat session: message list, context store and the current cards.
///
/// Context is passed explicitly through this object; nothing is global.
#[derive(Debug, Clone)]
pub struct ProactiveSession {
    id: String,
    messages: Vec<Message>,
    store: ContextStore,
    generator: SuggestionGenerator,
    suggestions: Vec<Suggestion>,
}

impl ProactiveSession {
    pub fn new(id: impl Into<String>, settings: EngineSettings) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
            store: ContextStore::new(settings.max_recent_topics),
            generator: SuggestionGenerator::new(settings),
            suggestions: Vec::new(),
        }
    }

    pub fn with_generator(mut self, generator: SuggestionGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Rebuild a session from a persisted snapshot
    pub fn restore(snapshot: ContextSnapshot, settings: EngineSettings) -> Self {
        let store = ContextStore::from_parts(
            snapshot.user_context,
            snapshot.conversation_history,
            snapshot.dismissed_suggestions,
            settings.max_recent_topics,
        );
        Self {
            id: snapshot.session_id,
            messages: Vec::new(),
            store,
            generator: SuggestionGenerator::new(settings),
            suggestions: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            session_id: self.id.clone(),
            user_context: self.store.user_context().clone(),
            conversation_history: self.store.history().clone(),
            dismissed_suggestions: self.store.dismissed().clone(),
            updated_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn store(&self) -> &ContextStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ContextStore {
        &mut self.store
    }

    pub fn generator(&self) -> &SuggestionGenerator {
        &self.generator
    }

    /// Current cards; the welcome set while no message has been sent
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn welcome(&mut self) -> &[Suggestion] {
        self.welcome_at(Utc::now())
    }

    pub fn welcome_at(&mut self, now: DateTime<Utc>) -> &[Suggestion] {
        if !self.has_messages() {
            let dismissed = self.store.dismissed();
            self.suggestions = self
                .generator
                .welcome_suggestions(now)
                .into_iter()
                .filter(|s| !dismissed.contains(&s.id))
                .collect();
        }
        &self.suggestions
    }

    pub fn process_user_message(&mut self, text: &str) -> &[Suggestion] {
        self.process_user_message_at(text, Utc::now())
    }

    /// Append the user message, update the context and regenerate cards
    pub fn process_user_message_at(&mut self, text: &str, now: DateTime<Utc>) -> &[Suggestion] {
        self.messages.push(Message::new_at(Role::User, text, now));

        let topics = self.generator.extractor().extract(text);
        self.store.record_interaction(&topics, now);

        self.suggestions = self.generator.generate_excluding(
            self.store.user_context(),
            self.store.history(),
            &self.messages,
            now,
            self.store.dismissed(),
        );

        info!(
            session_id = %self.id,
            topics = topics.len(),
            suggestions = self.suggestions.len(),
            "processed user message"
        );
        &self.suggestions
    }

    pub fn push_assistant_message(&mut self, content: impl Into<String>) -> &Message {
        self.messages.push(Message::assistant(content));
        let last = self.messages.len() - 1;
        &self.messages[last]
    }

    pub fn find_suggestion(&self, suggestion_id: &str) -> Option<&Suggestion> {
        self.suggestions.iter().find(|s| s.id == suggestion_id)
    }

    /// Drop a card from the current list and remember the dismissal.
    /// Returns whether a card with that id was showing.
    pub fn dismiss_suggestion(&mut self, suggestion_id: &str) -> bool {
        self.store.dismiss(suggestion_id);
        let before = self.suggestions.len();
        self.suggestions.retain(|s| s.id != suggestion_id);
        before != self.suggestions.len()
    }

    /// Forget messages, context and cards
    pub fn reset(&mut self) {
        self.messages.clear();
        self.suggestions.clear();
        self.store.reset();
    }
}
