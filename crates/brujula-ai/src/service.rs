use async_trait::async_trait;
use brujula_core::{AssistantProfile, UserContext};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AiResult;

/// What kind of content is being asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Chat,
    Copy,
    Campaign,
    Strategy,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Chat => write!(f, "chat"),
            ContentKind::Copy => write!(f, "copy"),
            ContentKind::Campaign => write!(f, "campaign"),
            ContentKind::Strategy => write!(f, "strategy"),
        }
    }
}

/// The slice of session state a content service gets to see
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiContext {
    pub profile: AssistantProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default)]
    pub recent_topics: Vec<String>,
    #[serde(default)]
    pub interaction_count: u32,
}

impl AiContext {
    pub fn from_user_context(profile: AssistantProfile, context: &UserContext) -> Self {
        Self {
            profile,
            region: context.region.clone(),
            industry: context.industry.clone(),
            recent_topics: context.recent_topics.clone(),
            interaction_count: context.interaction_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiRequest {
    pub prompt: String,
    pub context: AiContext,
    #[serde(rename = "type")]
    pub kind: ContentKind,
}

impl AiRequest {
    pub fn new(prompt: impl Into<String>, context: AiContext, kind: ContentKind) -> Self {
        Self {
            prompt: prompt.into(),
            context,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub content: String,
}

impl AiResponse {
    pub fn new(kind: ContentKind, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            content: content.into(),
        }
    }
}

/// Content-generation backend
#[async_trait]
pub trait AiService: Send + Sync {
    /// Produce one piece of content for a prompt
    async fn generate_content(&self, request: AiRequest) -> AiResult<AiResponse>;

    /// Produce standalone ideas from the context alone
    async fn get_suggestions(&self, context: &AiContext) -> AiResult<Vec<AiResponse>>;
}

#[async_trait]
impl<T: AiService + ?Sized> AiService for std::sync::Arc<T> {
    async fn generate_content(&self, request: AiRequest) -> AiResult<AiResponse> {
        (**self).generate_content(request).await
    }

    async fn get_suggestions(&self, context: &AiContext) -> AiResult<Vec<AiResponse>> {
        (**self).get_suggestions(context).await
    }
}
