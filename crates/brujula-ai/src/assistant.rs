use brujula_core::{AssistantProfile, Message, Suggestion};
use brujula_proactive::ProactiveSession;
use tracing::{info, warn};

use crate::error::{AiError, AiResult};
use crate::service::{AiContext, AiRequest, AiResponse, AiService, ContentKind};

/// Result of one user turn
#[derive(Debug, Clone)]
pub struct AssistantTurn {
    pub reply: Message,
    pub suggestions: Vec<Suggestion>,
    /// The service failed and `reply` is the canned fallback
    pub fallback: bool,
}

/// Chat assistant. The profile only changes branding; every profile runs the
/// same proactive pipeline.
pub struct Assistant<S: AiService> {
    profile: AssistantProfile,
    service: S,
    session: ProactiveSession,
}

impl<S: AiService> Assistant<S> {
    pub fn new(profile: AssistantProfile, service: S, session: ProactiveSession) -> Self {
        Self {
            profile,
            service,
            session,
        }
    }

    pub fn profile(&self) -> AssistantProfile {
        self.profile
    }

    pub fn greeting(&self) -> &'static str {
        self.profile.greeting()
    }

    pub fn session(&self) -> &ProactiveSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ProactiveSession {
        &mut self.session
    }

    pub fn into_session(self) -> ProactiveSession {
        self.session
    }

    fn context(&self) -> AiContext {
        AiContext::from_user_context(self.profile, self.session.store().user_context())
    }

    /// Run one turn: update context and cards, then ask the service for a
    /// reply. A failing service yields the fallback reply, not an error.
    pub async fn send(&mut self, text: &str) -> AiResult<AssistantTurn> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AiError::InvalidRequest("empty message".to_string()));
        }

        let suggestions = self.session.process_user_message(text).to_vec();
        let request = AiRequest::new(text, self.context(), ContentKind::Chat);

        let (content, fallback) = match self.service.generate_content(request).await {
            Ok(response) => (response.content, false),
            Err(e) => {
                warn!(profile = %self.profile, error = %e, "content generation failed, using fallback reply");
                (self.fallback_reply(), true)
            }
        };

        let reply = self.session.push_assistant_message(content).clone();
        info!(
            profile = %self.profile,
            session_id = %self.session.id(),
            suggestions = suggestions.len(),
            fallback,
            "assistant turn complete"
        );

        Ok(AssistantTurn {
            reply,
            suggestions,
            fallback,
        })
    }

    /// Send the card's action prompt as the next user message
    pub async fn accept_suggestion(&mut self, suggestion_id: &str) -> AiResult<AssistantTurn> {
        let suggestion = self
            .session
            .find_suggestion(suggestion_id)
            .ok_or_else(|| AiError::SuggestionNotFound(suggestion_id.to_string()))?;
        let prompt = suggestion
            .action
            .as_ref()
            .map(|a| a.prompt.clone())
            .ok_or_else(|| AiError::NoAction(suggestion_id.to_string()))?;
        self.send(&prompt).await
    }

    pub fn dismiss_suggestion(&mut self, suggestion_id: &str) -> bool {
        self.session.dismiss_suggestion(suggestion_id)
    }

    /// Cards to show before the first message
    pub fn welcome(&mut self) -> Vec<Suggestion> {
        self.session.welcome().to_vec()
    }

    /// Free-form ideas from the service for the current context
    pub async fn ideas(&self) -> AiResult<Vec<AiResponse>> {
        self.service.get_suggestions(&self.context()).await
    }

    /// Generate a specific piece of content (copy, campaign, strategy)
    pub async fn generate(&self, prompt: &str, kind: ContentKind) -> AiResult<AiResponse> {
        self.service
            .generate_content(AiRequest::new(prompt, self.context(), kind))
            .await
    }

    fn fallback_reply(&self) -> String {
        format!(
            "{} no pudo generar una respuesta en este momento. Mientras tanto, revisa las sugerencias de abajo.",
            self.profile.display_name()
        )
    }
}
