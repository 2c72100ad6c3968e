use brujula_core::AssistantProfile;
use serde::{Deserialize, Serialize};

/// Top-level configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub version: String,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub proactive: ProactiveConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            assistant: AssistantConfig::default(),
            proactive: ProactiveConfig::default(),
            ai: AiConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Read a value by dotted key, e.g. `proactive.max_suggestions`
    pub fn get_value(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["version"] => Some(self.version.clone()),
            ["assistant", "profile"] => Some(self.assistant.profile.id().to_string()),
            ["assistant", "user_name"] => self.assistant.user_name.clone(),
            ["proactive", "max_suggestions"] => Some(self.proactive.max_suggestions.to_string()),
            ["proactive", "max_recent_topics"] => Some(self.proactive.max_recent_topics.to_string()),
            ["proactive", "optimization_threshold"] => {
                Some(self.proactive.optimization_threshold.to_string())
            }
            ["ai", "thinking_delay_min_ms"] => Some(self.ai.thinking_delay_min_ms.to_string()),
            ["ai", "thinking_delay_max_ms"] => Some(self.ai.thinking_delay_max_ms.to_string()),
            ["storage", "path"] => self.storage.path.clone(),
            ["logging", "level"] => Some(self.logging.level.to_string()),
            ["logging", "file"] => self.logging.file.clone(),
            _ => None,
        }
    }

    /// Set a value by dotted key
    pub fn set_value(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["assistant", "profile"] => {
                self.assistant.profile = value
                    .parse()
                    .map_err(|e| ConfigError::Validation(format!("{}", e)))?;
            }
            ["assistant", "user_name"] => {
                self.assistant.user_name = Some(value.to_string());
            }
            ["proactive", "max_suggestions"] => {
                self.proactive.max_suggestions = parse_number(value)?;
            }
            ["proactive", "max_recent_topics"] => {
                self.proactive.max_recent_topics = parse_number(value)?;
            }
            ["proactive", "optimization_threshold"] => {
                self.proactive.optimization_threshold = parse_number(value)?;
            }
            ["ai", "thinking_delay_min_ms"] => {
                self.ai.thinking_delay_min_ms = parse_number(value)?;
            }
            ["ai", "thinking_delay_max_ms"] => {
                self.ai.thinking_delay_max_ms = parse_number(value)?;
            }
            ["storage", "path"] => {
                self.storage.path = Some(value.to_string());
            }
            ["logging", "level"] => {
                self.logging.level = value.parse()?;
            }
            ["logging", "file"] => {
                self.logging.file = Some(value.to_string());
            }
            _ => return Err(ConfigError::KeyNotFound(key.to_string())),
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(value: &str) -> ConfigResult<T> {
    value
        .parse()
        .map_err(|_| ConfigError::Validation(format!("Invalid number: {}", value)))
}

/// Assistant branding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AssistantConfig {
    pub profile: AssistantProfile,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_name: Option<String>,
}

/// Proactive engine tunables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProactiveConfig {
    pub max_suggestions: usize,
    pub max_recent_topics: usize,
    pub optimization_threshold: u32,
}

impl Default for ProactiveConfig {
    fn default() -> Self {
        Self {
            max_suggestions: brujula_core::MAX_SUGGESTIONS,
            max_recent_topics: brujula_core::MAX_RECENT_TOPICS,
            optimization_threshold: 5,
        }
    }
}

/// Simulated content generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiConfig {
    pub thinking_delay_min_ms: u64,
    pub thinking_delay_max_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            thinking_delay_min_ms: 1500,
            thinking_delay_max_ms: 2500,
        }
    }
}

/// Where context snapshots live
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    pub path: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: Some("~/.brujula/context".to_string()),
        }
    }
}

/// Log verbosity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::Validation(format!("Invalid log level: {}", s))),
        }
    }
}

/// Logging output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Log to this file instead of stderr
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub file: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.assistant.profile, AssistantProfile::Brujula);
        assert_eq!(config.proactive.max_suggestions, 3);
        assert_eq!(config.proactive.max_recent_topics, 5);
        assert_eq!(config.proactive.optimization_threshold, 5);
        assert_eq!(config.ai.thinking_delay_min_ms, 1500);
    }

    #[test]
    fn test_get_and_set_value() {
        let mut config = Config::default();
        config.set_value("assistant.profile", "tause-pro").unwrap();
        config.set_value("proactive.max_suggestions", "4").unwrap();
        config.set_value("logging.level", "WARNING").unwrap();

        assert_eq!(config.get_value("assistant.profile").as_deref(), Some("tause_pro"));
        assert_eq!(config.get_value("proactive.max_suggestions").as_deref(), Some("4"));
        assert_eq!(config.get_value("logging.level").as_deref(), Some("warn"));
        assert!(config.get_value("server.port").is_none());
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let mut config = Config::default();
        assert!(matches!(
            config.set_value("proactive.max_suggestions", "tres"),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            config.set_value("nope", "1"),
            Err(ConfigError::KeyNotFound(_))
        ));
        assert!(config.set_value("assistant.profile", "hermes").is_err());
    }

    #[test]
    fn test_partial_file_uses_section_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"version": "0.1.0", "assistant": {"profile": "tause_pro"}}"#).unwrap();
        assert_eq!(config.assistant.profile, AssistantProfile::TausePro);
        assert_eq!(config.ai, AiConfig::default());
    }
}
