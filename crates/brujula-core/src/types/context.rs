use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper bound of the recent-topics window
pub const MAX_RECENT_TOPICS: usize = 5;

/// Accumulated session state describing the user's recent interests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    /// Distinct topics, newest first
    #[serde(default)]
    pub recent_topics: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub region: Option<String>,
    pub last_activity: DateTime<Utc>,
    #[serde(default)]
    pub interaction_count: u32,
}

impl Default for UserContext {
    fn default() -> Self {
        Self {
            recent_topics: Vec::new(),
            interests: Vec::new(),
            industry: None,
            region: None,
            last_activity: Utc::now(),
            interaction_count: 0,
        }
    }
}

impl UserContext {
    /// Move `topic` to the front of the recent-topics window, evicting the
    /// oldest entries beyond `cap`. Duplicates compare case-insensitively.
    pub fn push_recent_topic(&mut self, topic: &str, cap: usize) {
        let key = topic.to_lowercase();
        self.recent_topics.retain(|t| t.to_lowercase() != key);
        self.recent_topics.insert(0, topic.to_string());
        self.recent_topics.truncate(cap);
    }

    pub fn add_interest(&mut self, interest: &str) {
        let key = interest.to_lowercase();
        if !self.interests.iter().any(|i| i.to_lowercase() == key) {
            self.interests.push(interest.to_string());
        }
    }

    /// Shallow merge: every `Some` field in the patch replaces the current value
    pub fn apply(&mut self, patch: UserContextPatch) {
        if let Some(recent_topics) = patch.recent_topics {
            self.recent_topics = distinct(recent_topics);
        }
        if let Some(interests) = patch.interests {
            self.interests = distinct(interests);
        }
        if let Some(industry) = patch.industry {
            self.industry = industry;
        }
        if let Some(region) = patch.region {
            self.region = region;
        }
        if let Some(last_activity) = patch.last_activity {
            self.last_activity = last_activity;
        }
        if let Some(interaction_count) = patch.interaction_count {
            self.interaction_count = interaction_count;
        }
    }
}

/// Drop case-insensitive repeats, keeping the first spelling
fn distinct(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}

/// Partial update for [`UserContext`].
///
/// `industry` and `region` are doubly optional so a patch can clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserContextPatch {
    pub recent_topics: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub industry: Option<Option<String>>,
    pub region: Option<Option<String>>,
    pub last_activity: Option<DateTime<Utc>>,
    pub interaction_count: Option<u32>,
}

impl UserContextPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(Some(industry.into()));
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(Some(region.into()));
        self
    }

    pub fn with_interests(mut self, interests: Vec<String>) -> Self {
        self.interests = Some(interests);
        self
    }

    pub fn with_interaction_count(mut self, count: u32) -> Self {
        self.interaction_count = Some(count);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationHistoryEntry {
    /// Topic as first mentioned
    pub topic: String,
    pub frequency: u32,
    pub last_discussed: DateTime<Utc>,
}

/// Mention tally keyed by lower-cased topic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    entries: BTreeMap<String, ConversationHistoryEntry>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the tally for `topic`, inserting it on first mention
    pub fn record(&mut self, topic: &str, at: DateTime<Utc>) -> &ConversationHistoryEntry {
        self.entries
            .entry(topic.to_lowercase())
            .and_modify(|e| {
                e.frequency += 1;
                e.last_discussed = at;
            })
            .or_insert_with(|| ConversationHistoryEntry {
                topic: topic.to_string(),
                frequency: 1,
                last_discussed: at,
            })
    }

    pub fn get(&self, topic: &str) -> Option<&ConversationHistoryEntry> {
        self.entries.get(&topic.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversationHistoryEntry> {
        self.entries.values()
    }

    /// Most discussed topics: frequency descending, then most recent first
    pub fn top(&self, n: usize) -> Vec<&ConversationHistoryEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then_with(|| b.last_discussed.cmp(&a.last_discussed))
        });
        entries.truncate(n);
        entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_recent_topics_capped_and_distinct() {
        let mut ctx = UserContext::default();
        for topic in ["Cali", "retail", "Bogotá", "moda", "TikTok", "Navidad", "cali"] {
            ctx.push_recent_topic(topic, MAX_RECENT_TOPICS);
        }
        assert_eq!(ctx.recent_topics.len(), MAX_RECENT_TOPICS);
        assert_eq!(ctx.recent_topics[0], "cali");
        assert_eq!(
            ctx.recent_topics.iter().filter(|t| t.to_lowercase() == "cali").count(),
            1
        );
        assert!(!ctx.recent_topics.contains(&"retail".to_string()));
    }

    #[test]
    fn test_patch_is_shallow_merge() {
        let mut ctx = UserContext::default();
        ctx.region = Some("Medellín".to_string());
        ctx.interaction_count = 3;

        ctx.apply(UserContextPatch::new().with_industry("moda"));
        assert_eq!(ctx.industry.as_deref(), Some("moda"));
        assert_eq!(ctx.region.as_deref(), Some("Medellín"));
        assert_eq!(ctx.interaction_count, 3);

        ctx.apply(UserContextPatch {
            region: Some(None),
            ..Default::default()
        });
        assert!(ctx.region.is_none());
    }

    #[test]
    fn test_patch_keeps_topics_distinct() {
        let mut ctx = UserContext::default();
        ctx.apply(UserContextPatch {
            recent_topics: Some(vec!["Cali".into(), "moda".into(), "CALI".into(), "Moda".into()]),
            interests: Some(vec!["TikTok".into(), "tiktok".into()]),
            ..Default::default()
        });
        assert_eq!(ctx.recent_topics, vec!["Cali", "moda"]);
        assert_eq!(ctx.interests, vec!["TikTok"]);
    }

    #[test]
    fn test_history_increments_case_insensitively() {
        let now = Utc::now();
        let mut history = ConversationHistory::new();
        history.record("Cali", now);
        history.record("CALI", now + Duration::minutes(1));
        history.record("retail", now);

        let entry = history.get("cali").unwrap();
        assert_eq!(entry.frequency, 2);
        assert_eq!(entry.topic, "Cali");
        assert_eq!(entry.last_discussed, now + Duration::minutes(1));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_history_top_orders_by_frequency() {
        let now = Utc::now();
        let mut history = ConversationHistory::new();
        history.record("moda", now);
        history.record("Cali", now);
        history.record("Cali", now);
        history.record("retail", now + Duration::seconds(5));

        let top: Vec<_> = history.top(2).into_iter().map(|e| e.topic.as_str()).collect();
        assert_eq!(top, vec!["Cali", "retail"]);
    }
}
