use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ParseError;

/// Upper bound on cards produced per turn
pub const MAX_SUGGESTIONS: usize = 3;

/// Category of a suggestion card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Trend,
    Regional,
    Date,
    Insight,
    Opportunity,
    Optimization,
}

impl SuggestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionType::Trend => "trend",
            SuggestionType::Regional => "regional",
            SuggestionType::Date => "date",
            SuggestionType::Insight => "insight",
            SuggestionType::Opportunity => "opportunity",
            SuggestionType::Optimization => "optimization",
        }
    }
}

impl std::fmt::Display for SuggestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SuggestionType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trend" => Ok(SuggestionType::Trend),
            "regional" => Ok(SuggestionType::Regional),
            "date" => Ok(SuggestionType::Date),
            "insight" => Ok(SuggestionType::Insight),
            "opportunity" => Ok(SuggestionType::Opportunity),
            "optimization" => Ok(SuggestionType::Optimization),
            _ => Err(ParseError::UnknownSuggestionType(s.to_string())),
        }
    }
}

/// Follow-up attached to a card. Accepting the card sends `prompt` as if
/// the user had typed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionAction {
    pub label: String,
    pub prompt: String,
}

impl SuggestionAction {
    pub fn new(label: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            prompt: prompt.into(),
        }
    }
}

/// A recommendation card produced by the proactive engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub action: Option<SuggestionAction>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub metadata: HashMap<String, Value>,
}

impl Suggestion {
    pub fn new(kind: SuggestionType, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.into(),
            description: description.into(),
            action: None,
            tags: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    /// Replace the random id with a stable one so dismissals survive regeneration
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_action(mut self, label: impl Into<String>, prompt: impl Into<String>) -> Self {
        self.action = Some(SuggestionAction::new(label, prompt));
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
