use brujula_core::{MAX_RECENT_TOPICS, MAX_SUGGESTIONS};

/// Tunables for the proactive engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Upper bound on suggestions returned per turn
    pub max_suggestions: usize,
    /// Size of the recent-topics window
    pub max_recent_topics: usize,
    /// Optimization advice appears once the interaction count exceeds this
    pub optimization_threshold: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_suggestions: MAX_SUGGESTIONS,
            max_recent_topics: MAX_RECENT_TOPICS,
            optimization_threshold: 5,
        }
    }
}

impl EngineSettings {
    /// Pull both caps into `1..=MAX_SUGGESTIONS` and `1..=MAX_RECENT_TOPICS`
    pub fn clamped(self) -> Self {
        Self {
            max_suggestions: self.max_suggestions.clamp(1, MAX_SUGGESTIONS),
            max_recent_topics: self.max_recent_topics.clamp(1, MAX_RECENT_TOPICS),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_caps() {
        let wide = EngineSettings {
            max_suggestions: 10,
            max_recent_topics: 10,
            optimization_threshold: 7,
        }
        .clamped();
        assert_eq!(wide.max_suggestions, 3);
        assert_eq!(wide.max_recent_topics, 5);
        assert_eq!(wide.optimization_threshold, 7);

        let zero = EngineSettings {
            max_suggestions: 0,
            max_recent_topics: 0,
            ..Default::default()
        }
        .clamped();
        assert_eq!((zero.max_suggestions, zero.max_recent_topics), (1, 1));
        assert_eq!(EngineSettings::default().clamped(), EngineSettings::default());
    }
}
