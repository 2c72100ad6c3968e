use std::time::Duration;

use async_trait::async_trait;
use brujula_core::AssistantProfile;
use brujula_proactive::{find_industry, find_region};
use rand::Rng;
use tracing::debug;

use crate::error::{AiError, AiResult};
use crate::service::{AiContext, AiRequest, AiResponse, AiService, ContentKind};

/// Canned content generator standing in for a real model.
///
/// Waits a random "thinking" delay within the configured range, then builds
/// a reply from the context and the regional/industry tables.
#[derive(Debug, Clone)]
pub struct SimulatedAiService {
    min_delay: Duration,
    max_delay: Duration,
}

impl Default for SimulatedAiService {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500), Duration::from_millis(2500))
    }
}

impl SimulatedAiService {
    /// `min_delay` above `max_delay` is clamped down to `max_delay`
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            min_delay: min_delay.min(max_delay),
            max_delay,
        }
    }

    /// No delay; for tests and scripted runs
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    async fn think(&self) {
        if self.max_delay.is_zero() {
            return;
        }
        let millis = rand::thread_rng()
            .gen_range(self.min_delay.as_millis() as u64..=self.max_delay.as_millis() as u64);
        debug!(millis, "simulating generation delay");
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    fn compose(&self, request: &AiRequest) -> String {
        let ctx = &request.context;
        let lead = ctx.profile.tone();
        let region = ctx.region.as_deref().and_then(find_region);
        let industry = ctx.industry.as_deref().and_then(find_industry);

        let focus = match (region, industry) {
            (Some(r), Some(i)) => format!(
                "para {} en {}: {} Además, en {}, {}",
                i.name, r.name, capitalize(r.insight), i.name, i.trend
            ),
            (Some(r), None) => format!("en {}: {}", r.name, capitalize(r.insight)),
            (None, Some(i)) => format!("en {}: {}", i.name, capitalize(i.trend)),
            (None, None) => {
                "cuéntame tu ciudad y tu sector para darte recomendaciones más precisas.".to_string()
            }
        };

        match request.kind {
            ContentKind::Chat => format!("{}, {}", lead, focus),
            ContentKind::Copy => format!(
                "{}. Propuesta de copy: \"{}\" – {}",
                lead,
                headline(ctx),
                focus
            ),
            ContentKind::Campaign => format!(
                "{}. Campaña en tres fases (expectativa, lanzamiento, recordación) {}",
                lead, focus
            ),
            ContentKind::Strategy => format!(
                "{}. Estrategia sugerida {} Mide resultados cada semana y ajusta.",
                lead, focus
            ),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn headline(ctx: &AiContext) -> String {
    match (&ctx.region, &ctx.industry) {
        (Some(region), Some(industry)) => format!("Lo mejor de {} en {}, cerca de ti", industry, region),
        (Some(region), None) => format!("Hecho para {}", region),
        (None, Some(industry)) => format!("Lo nuevo en {}", industry),
        (None, None) => match ctx.profile {
            AssistantProfile::Brujula => "Encuentra tu norte".to_string(),
            AssistantProfile::TausePro => "Resultados que se notan".to_string(),
        },
    }
}

#[async_trait]
impl AiService for SimulatedAiService {
    async fn generate_content(&self, request: AiRequest) -> AiResult<AiResponse> {
        if request.prompt.trim().is_empty() {
            return Err(AiError::InvalidRequest("empty prompt".to_string()));
        }
        self.think().await;
        Ok(AiResponse::new(request.kind, self.compose(&request)))
    }

    async fn get_suggestions(&self, context: &AiContext) -> AiResult<Vec<AiResponse>> {
        self.think().await;
        let ideas = context
            .recent_topics
            .iter()
            .take(3)
            .map(|topic| {
                AiResponse::new(
                    ContentKind::Strategy,
                    format!(
                        "Idea para {}: crea una serie de contenidos cortos que conecte {} con tu audiencia local.",
                        topic, topic
                    ),
                )
            })
            .collect();
        Ok(ideas)
    }
}
