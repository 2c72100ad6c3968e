use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use brujula_ai::{
    AiContext, AiError, AiRequest, AiResponse, AiResult, AiService, Assistant, ContentKind,
    SimulatedAiService,
};
use brujula_core::{AssistantProfile, Role, SuggestionType};
use brujula_proactive::{EngineSettings, ProactiveSession};

/// Mock service that records requests and can be told to fail
struct MockAiService {
    reply: String,
    fail: bool,
    calls: AtomicUsize,
    requests: Mutex<Vec<AiRequest>>,
}

impl MockAiService {
    fn with_reply(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_reply("")
        }
    }
}

#[async_trait]
impl AiService for MockAiService {
    async fn generate_content(&self, request: AiRequest) -> AiResult<AiResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let kind = request.kind;
        self.requests.lock().unwrap().push(request);
        if self.fail {
            return Err(AiError::Unavailable);
        }
        Ok(AiResponse::new(kind, self.reply.clone()))
    }

    async fn get_suggestions(&self, _context: &AiContext) -> AiResult<Vec<AiResponse>> {
        if self.fail {
            return Err(AiError::Unavailable);
        }
        Ok(vec![AiResponse::new(ContentKind::Strategy, self.reply.clone())])
    }
}

fn session(id: &str) -> ProactiveSession {
    ProactiveSession::new(id, EngineSettings::default())
}

#[tokio::test]
async fn test_turn_appends_both_messages_and_returns_cards() {
    let mock = Arc::new(MockAiService::with_reply("Claro, hablemos de Cali."));
    let mut assistant = Assistant::new(AssistantProfile::Brujula, Arc::clone(&mock), session("t1"));

    let turn = assistant
        .send("¿Cómo entro al mercado de Cali en tecnología?")
        .await
        .unwrap();

    assert!(!turn.fallback);
    assert_eq!(turn.reply.role, Role::Assistant);
    assert_eq!(turn.reply.content, "Claro, hablemos de Cali.");
    assert_eq!(turn.suggestions[0].kind, SuggestionType::Regional);
    assert_eq!(turn.suggestions[1].kind, SuggestionType::Trend);

    let messages = assistant.session().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);

    let requests = mock.requests.lock().unwrap();
    assert_eq!(requests[0].context.region.as_deref(), Some("Cali"));
    assert_eq!(requests[0].context.industry.as_deref(), Some("tecnología"));
}

#[tokio::test]
async fn test_service_failure_falls_back() {
    let mut assistant = Assistant::new(AssistantProfile::TausePro, MockAiService::failing(), session("t2"));

    let turn = assistant.send("Black Friday en Bogotá").await.unwrap();

    assert!(turn.fallback);
    assert!(turn.reply.content.contains("Tause Pro"));
    assert!(!turn.suggestions.is_empty());
    assert!(assistant.ideas().await.is_err());
}

#[tokio::test]
async fn test_empty_message_is_rejected_without_side_effects() {
    let mock = Arc::new(MockAiService::with_reply("ok"));
    let mut assistant = Assistant::new(AssistantProfile::Brujula, Arc::clone(&mock), session("t3"));

    assert!(matches!(assistant.send("   ").await, Err(AiError::InvalidRequest(_))));
    assert!(!assistant.session().has_messages());
    assert_eq!(mock.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_accept_suggestion_sends_action_prompt() {
    let mock = Arc::new(MockAiService::with_reply("ok"));
    let mut assistant = Assistant::new(AssistantProfile::Brujula, Arc::clone(&mock), session("t4"));

    let turn = assistant.send("Vendo moda en Medellín").await.unwrap();
    let regional = turn
        .suggestions
        .iter()
        .find(|s| s.kind == SuggestionType::Regional)
        .unwrap()
        .clone();

    assistant.accept_suggestion(&regional.id).await.unwrap();

    let requests = mock.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].prompt, regional.action.unwrap().prompt);
    drop(requests);

    assert!(matches!(
        assistant.accept_suggestion("no-such-card").await,
        Err(AiError::SuggestionNotFound(_))
    ));
}

#[tokio::test]
async fn test_profiles_share_the_same_engine() {
    let text = "¿Qué hago en Cartagena para turismo?";
    let mut brujula = Assistant::new(AssistantProfile::Brujula, SimulatedAiService::instant(), session("a"));
    let mut tause = Assistant::new(AssistantProfile::TausePro, SimulatedAiService::instant(), session("b"));

    let a = brujula.send(text).await.unwrap();
    let b = tause.send(text).await.unwrap();

    let kinds = |turn: &brujula_ai::AssistantTurn| turn.suggestions.iter().map(|s| s.id.clone()).collect::<Vec<_>>();
    assert_eq!(kinds(&a), kinds(&b));
    assert!(a.reply.content.starts_with(AssistantProfile::Brujula.tone()));
    assert!(b.reply.content.starts_with(AssistantProfile::TausePro.tone()));
    assert_ne!(brujula.greeting(), tause.greeting());
}

#[tokio::test]
async fn test_welcome_then_dismiss() {
    let mut assistant = Assistant::new(AssistantProfile::Brujula, SimulatedAiService::instant(), session("t5"));
    let welcome = assistant.welcome();
    assert_eq!(welcome[0].kind, SuggestionType::Insight);

    assert!(assistant.dismiss_suggestion(&welcome[0].id));
    assert!(assistant.session().store().is_dismissed("welcome:insight"));
    assert!(assistant.welcome().iter().all(|s| s.kind != SuggestionType::Insight));
}
