use std::collections::BTreeSet;

use brujula_core::{
    last_user_message, ConversationHistory, Message, Suggestion, SuggestionType, UserContext,
};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::calendar::{EventCalendar, UpcomingEvent};
use crate::catalog::{self, IndustryTrend, RegionInsight};
use crate::extractor::TopicExtractor;
use crate::settings::EngineSettings;

/// Rule-based suggestion generator.
///
/// Rules run in a fixed order (regional, trend, date, optimization) and each
/// contributes at most one card. The result is cut to
/// [`EngineSettings::max_suggestions`] without re-ranking. Settings are
/// clamped on construction, so no call returns more than three cards.
#[derive(Debug, Clone, Default)]
pub struct SuggestionGenerator {
    extractor: TopicExtractor,
    calendar: EventCalendar,
    settings: EngineSettings,
}

impl SuggestionGenerator {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            extractor: TopicExtractor::new(),
            calendar: EventCalendar::default(),
            settings: settings.clamped(),
        }
    }

    pub fn with_calendar(mut self, calendar: EventCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn extractor(&self) -> &TopicExtractor {
        &self.extractor
    }

    pub fn calendar(&self) -> &EventCalendar {
        &self.calendar
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn generate(
        &self,
        context: &UserContext,
        history: &ConversationHistory,
        messages: &[Message],
        now: DateTime<Utc>,
    ) -> Vec<Suggestion> {
        self.generate_excluding(context, history, messages, now, &BTreeSet::new())
    }

    /// Same as [`generate`](Self::generate) but skips cards whose id is in
    /// `dismissed` before truncating.
    pub fn generate_excluding(
        &self,
        context: &UserContext,
        history: &ConversationHistory,
        messages: &[Message],
        now: DateTime<Utc>,
        dismissed: &BTreeSet<String>,
    ) -> Vec<Suggestion> {
        let topics = match last_user_message(messages) {
            Some(message) => self.extractor.extract(&message.content),
            None => context.recent_topics.clone(),
        };

        let region = self
            .extractor
            .first_region(&topics)
            .and_then(catalog::find_region);
        let industry = self
            .extractor
            .first_industry(&topics)
            .and_then(catalog::find_industry);

        let mut suggestions = Vec::with_capacity(4);

        if let Some(region) = region {
            suggestions.push(regional_suggestion(region, industry.or_else(|| {
                context.industry.as_deref().and_then(catalog::find_industry)
            })));
        }

        if let Some(industry) = industry {
            let mentions = history.get(industry.name).map(|e| e.frequency).unwrap_or(0);
            suggestions.push(trend_suggestion(industry, mentions));
        }

        if let Some(event) = self.calendar.next_event(now) {
            suggestions.push(date_suggestion(&event));
        }

        if context.interaction_count > self.settings.optimization_threshold {
            suggestions.push(optimization_suggestion(context.interaction_count));
        }

        suggestions.retain(|s| !dismissed.contains(&s.id));
        suggestions.truncate(self.settings.max_suggestions);

        debug!(
            topics = ?topics,
            kinds = ?suggestions.iter().map(|s| s.kind).collect::<Vec<_>>(),
            "generated proactive suggestions"
        );
        suggestions
    }

    /// Seed cards shown while a session has no messages yet
    pub fn welcome_suggestions(&self, now: DateTime<Utc>) -> Vec<Suggestion> {
        let mut suggestions = vec![
            Suggestion::new(
                SuggestionType::Insight,
                "Conoce a tu audiencia",
                "Cuéntame en qué ciudad y sector trabajas para darte recomendaciones locales.",
            )
            .with_id("welcome:insight")
            .with_action("Empezar", "Quiero conocer mejor a mi audiencia")
            .with_tag("inicio"),
        ];

        let event = self.calendar.next_event(now);
        let opportunity = match &event {
            Some(event) => Suggestion::new(
                SuggestionType::Opportunity,
                format!("Prepárate para {}", event.name),
                format!(
                    "Quedan {} días. Las marcas que planean con un mes de anticipación venden más en fechas especiales.",
                    event.days_until
                ),
            )
            .with_action(
                "Planear campaña",
                format!("Ayúdame a planear una campaña para {}", event.name),
            )
            .with_tag(event.name),
            None => Suggestion::new(
                SuggestionType::Opportunity,
                "Encuentra tu próxima oportunidad",
                "Revisemos qué fechas y tendencias pueden impulsar tus ventas.",
            ),
        };
        suggestions.push(opportunity.with_id("welcome:opportunity"));

        if let Some(event) = event {
            suggestions.push(date_suggestion(&event));
        }

        suggestions.truncate(self.settings.max_suggestions);
        suggestions
    }
}

fn regional_suggestion(region: &RegionInsight, industry: Option<&IndustryTrend>) -> Suggestion {
    let aligned = industry
        .map(|i| region.leading_industries.contains(&i.name))
        .unwrap_or(false);
    let confidence = if aligned { 0.9 } else { 0.75 };

    let mut suggestion = Suggestion::new(
        SuggestionType::Regional,
        format!("Oportunidad regional en {}", region.name),
        format!("{} ({}): {}", region.name, region.department, region.insight),
    )
    .with_id(format!("regional:{}", region.name.to_lowercase()))
    .with_action(
        format!("Explorar {}", region.name),
        format!(
            "¿Qué estrategia me recomiendas para llegar al mercado de {}?",
            region.name
        ),
    )
    .with_tag(region.name)
    .with_tag(region.department)
    .with_metadata("region", region.name)
    .with_metadata("confidence", confidence);

    if aligned {
        if let Some(industry) = industry {
            suggestion = suggestion.with_metadata("alignedIndustry", industry.name);
        }
    }
    suggestion
}

fn trend_suggestion(industry: &IndustryTrend, mentions: u32) -> Suggestion {
    let confidence = 0.7 + 0.05 * f64::from(mentions.saturating_sub(1).min(4));
    Suggestion::new(
        SuggestionType::Trend,
        format!("Tendencias en {}", industry.name),
        format!("En {}, {}", industry.name, industry.trend),
    )
    .with_id(format!("trend:{}", industry.name.to_lowercase()))
    .with_action(
        "Ver tendencias",
        format!(
            "¿Qué contenidos están funcionando en el sector {}?",
            industry.name
        ),
    )
    .with_tag(industry.name)
    .with_metadata("industry", industry.name)
    .with_metadata("mentions", mentions)
    .with_metadata("confidence", confidence)
}

fn date_suggestion(event: &UpcomingEvent) -> Suggestion {
    let confidence = if event.days_until <= 14 { 0.9 } else { 0.6 };
    Suggestion::new(
        SuggestionType::Date,
        format!("{} se acerca", event.name),
        format!(
            "Faltan {} días para {} ({}). {}",
            event.days_until,
            event.name,
            event.date.format("%d/%m/%Y"),
            event.description
        ),
    )
    .with_id(format!("date:{}:{}", event.name.to_lowercase(), event.date))
    .with_action(
        "Crear campaña",
        format!("Crea un calendario de contenidos para {}", event.name),
    )
    .with_tag(event.name)
    .with_metadata("eventDate", event.date.to_string())
    .with_metadata("daysUntil", event.days_until)
    .with_metadata("confidence", confidence)
}

fn optimization_suggestion(interaction_count: u32) -> Suggestion {
    Suggestion::new(
        SuggestionType::Optimization,
        "Optimiza tu estrategia",
        format!(
            "Llevamos {} interacciones. Revisemos qué contenidos están funcionando y ajustemos el plan.",
            interaction_count
        ),
    )
    .with_id("optimization")
    .with_action("Revisar resultados", "Analiza mi estrategia actual y dime qué mejorar")
    .with_metadata("interactionCount", interaction_count)
    .with_metadata("confidence", 0.5)
}
