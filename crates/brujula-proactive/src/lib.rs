//! Proactive suggestion engine for the Brújula assistant.
//!
//! A user message flows through [`TopicExtractor`] into the [`ContextStore`],
//! then [`SuggestionGenerator`] turns the updated context into at most a
//! handful of cards. [`ProactiveSession`] wires the three together and
//! [`ContextStorage`] persists the context between runs.

mod calendar;
mod catalog;
mod extractor;
mod generator;
mod session;
mod settings;
mod storage;
mod store;

pub use calendar::{
    colombia_offset, EventCalendar, EventDate, RetailEvent, UpcomingEvent, COLOMBIAN_RETAIL_EVENTS,
};
pub use catalog::{
    find_industry, find_region, IndustryTrend, RegionInsight, TopicCategory,
    INDUSTRIES, REGIONS, TRENDS,
};
pub use extractor::TopicExtractor;
pub use generator::SuggestionGenerator;
pub use session::{ContextSnapshot, ProactiveSession};
pub use settings::EngineSettings;
pub use storage::ContextStorage;
pub use store::ContextStore;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProactiveError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid session id: {0}")]
    InvalidSessionId(String),
}

pub type ProactiveResult<T> = Result<T, ProactiveError>;

/// Default directory for persisted context snapshots
pub fn default_storage_path() -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".brujula").join("context"))
        .unwrap_or_else(|| PathBuf::from("./brujula_context"))
}
