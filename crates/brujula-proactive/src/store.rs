use std::collections::BTreeSet;

use brujula_core::{
    ConversationHistory, ConversationHistoryEntry, UserContext, UserContextPatch,
    MAX_RECENT_TOPICS,
};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::catalog;

/// Mutable per-session context: user context, topic tally and dismissed
/// suggestion ids. Owned by exactly one session, so there is no locking.
#[derive(Debug, Clone)]
pub struct ContextStore {
    user_context: UserContext,
    history: ConversationHistory,
    dismissed: BTreeSet<String>,
    max_recent_topics: usize,
}

impl ContextStore {
    /// `max_recent_topics` is clamped to `1..=MAX_RECENT_TOPICS`
    pub fn new(max_recent_topics: usize) -> Self {
        Self {
            user_context: UserContext::default(),
            history: ConversationHistory::new(),
            dismissed: BTreeSet::new(),
            max_recent_topics: max_recent_topics.clamp(1, MAX_RECENT_TOPICS),
        }
    }

    pub fn from_parts(
        user_context: UserContext,
        history: ConversationHistory,
        dismissed: BTreeSet<String>,
        max_recent_topics: usize,
    ) -> Self {
        let mut store = Self {
            user_context,
            history,
            dismissed,
            max_recent_topics: max_recent_topics.clamp(1, MAX_RECENT_TOPICS),
        };
        // Restored state may come from a build with a wider window.
        store.user_context.recent_topics.truncate(store.max_recent_topics);
        store
    }

    pub fn user_context(&self) -> &UserContext {
        &self.user_context
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn dismissed(&self) -> &BTreeSet<String> {
        &self.dismissed
    }

    pub fn update_user_context(&mut self, patch: UserContextPatch) {
        self.user_context.apply(patch);
        self.user_context.recent_topics.truncate(self.max_recent_topics);
    }

    pub fn add_to_conversation_history(&mut self, topic: &str) -> &ConversationHistoryEntry {
        self.add_to_conversation_history_at(topic, Utc::now())
    }

    pub fn add_to_conversation_history_at(
        &mut self,
        topic: &str,
        at: DateTime<Utc>,
    ) -> &ConversationHistoryEntry {
        self.history.record(topic, at)
    }

    /// Fold one user message's topics into the context.
    ///
    /// Topics land at the front of the recent window in extraction order.
    /// The first detected region and industry replace the stored ones.
    pub fn record_interaction(&mut self, topics: &[String], at: DateTime<Utc>) {
        for topic in topics.iter().rev() {
            self.user_context
                .push_recent_topic(topic, self.max_recent_topics);
        }

        for topic in topics {
            self.user_context.add_interest(topic);
            self.history.record(topic, at);
        }

        if let Some(region) = topics.iter().find_map(|t| catalog::find_region(t)) {
            self.user_context.region = Some(region.name.to_string());
        }
        if let Some(industry) = topics.iter().find_map(|t| catalog::find_industry(t)) {
            self.user_context.industry = Some(industry.name.to_string());
        }

        self.user_context.last_activity = at;
        self.user_context.interaction_count += 1;

        debug!(
            interaction_count = self.user_context.interaction_count,
            recent_topics = ?self.user_context.recent_topics,
            "context updated"
        );
    }

    /// Returns false when the id was already dismissed
    pub fn dismiss(&mut self, suggestion_id: &str) -> bool {
        self.dismissed.insert(suggestion_id.to_string())
    }

    pub fn is_dismissed(&self, suggestion_id: &str) -> bool {
        self.dismissed.contains(suggestion_id)
    }

    pub fn reset(&mut self) {
        self.user_context = UserContext::default();
        self.history.clear();
        self.dismissed.clear();
    }
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new(MAX_RECENT_TOPICS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_recent_topics_never_exceed_five() {
        let mut store = ContextStore::default();
        let now = Utc::now();
        let batches = [
            topics(&["Cali", "tecnología"]),
            topics(&["Bogotá", "moda", "Black Friday", "TikTok"]),
            topics(&["Medellín", "retail", "Navidad"]),
            topics(&["Pasto"]),
        ];
        for batch in &batches {
            store.record_interaction(batch, now);
            assert!(store.user_context().recent_topics.len() <= 5);
        }
        assert_eq!(
            store.user_context().recent_topics,
            topics(&["Pasto", "Medellín", "retail", "Navidad", "Bogotá"])
        );
        assert_eq!(store.user_context().interaction_count, 4);
    }

    #[test]
    fn test_oversized_window_is_clamped() {
        let mut store = ContextStore::new(10);
        store.record_interaction(
            &topics(&["Bogotá", "Cali", "moda", "retail", "Black Friday", "TikTok", "Instagram"]),
            Utc::now(),
        );
        assert_eq!(store.user_context().recent_topics.len(), 5);

        store.update_user_context(UserContextPatch {
            recent_topics: Some(topics(&["a", "b", "c", "d", "e", "f", "g"])),
            ..Default::default()
        });
        assert_eq!(store.user_context().recent_topics.len(), 5);
    }

    #[test]
    fn test_region_and_industry_follow_latest_mention() {
        let mut store = ContextStore::default();
        let now = Utc::now();
        store.record_interaction(&topics(&["Cali", "tecnología"]), now);
        store.record_interaction(&topics(&["TikTok"]), now);
        assert_eq!(store.user_context().region.as_deref(), Some("Cali"));

        store.record_interaction(&topics(&["Medellín", "moda"]), now);
        assert_eq!(store.user_context().region.as_deref(), Some("Medellín"));
        assert_eq!(store.user_context().industry.as_deref(), Some("moda"));
        assert_eq!(store.user_context().interests.len(), 5);
    }

    #[test]
    fn test_history_counts_repeat_mentions() {
        let mut store = ContextStore::default();
        store.add_to_conversation_history("Cali");
        store.add_to_conversation_history("cali");
        let entry = store.add_to_conversation_history("CALI");
        assert_eq!(entry.frequency, 3);
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_update_user_context_shallow_merge() {
        let mut store = ContextStore::default();
        store.record_interaction(&topics(&["Cali"]), Utc::now());
        store.update_user_context(UserContextPatch::new().with_industry("salud"));
        assert_eq!(store.user_context().industry.as_deref(), Some("salud"));
        assert_eq!(store.user_context().region.as_deref(), Some("Cali"));
        assert_eq!(store.user_context().interaction_count, 1);
    }

    #[test]
    fn test_dismiss_and_reset() {
        let mut store = ContextStore::default();
        assert!(store.dismiss("regional:cali"));
        assert!(!store.dismiss("regional:cali"));
        assert!(store.is_dismissed("regional:cali"));

        store.record_interaction(&topics(&["Cali"]), Utc::now());
        store.reset();
        assert!(!store.is_dismissed("regional:cali"));
        assert_eq!(store.user_context().interaction_count, 0);
        assert!(store.history().is_empty());
    }
}
