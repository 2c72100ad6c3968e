pub mod assistant;
pub mod error;
pub mod service;
pub mod simulated;

pub use assistant::{Assistant, AssistantTurn};
pub use error::{AiError, AiResult};
pub use service::{AiContext, AiRequest, AiResponse, AiService, ContentKind};
pub use simulated::SimulatedAiService;
