use crate::config::{Config, ConfigError, ConfigResult};
use brujula_core::{MAX_RECENT_TOPICS, MAX_SUGGESTIONS};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Loads, validates and saves the JSON config file
#[derive(Clone)]
pub struct ConfigManager {
    path: PathBuf,
    config: Arc<RwLock<Config>>,
}

impl ConfigManager {
    /// Load the config file, writing defaults first if it does not exist
    pub async fn load(path: &Path) -> ConfigResult<Self> {
        let config = if path.exists() {
            info!("Loading config from {:?}", path);
            Self::read(path).await?
        } else {
            info!("Config file not found, creating default config at {:?}", path);
            let default_config = Config::default();
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            let content = serde_json::to_string_pretty(&default_config)?;
            tokio::fs::write(path, &content).await?;
            default_config
        };

        Ok(Self {
            path: path.to_path_buf(),
            config: Arc::new(RwLock::new(config)),
        })
    }

    pub async fn load_default() -> ConfigResult<Self> {
        let config_path = Self::default_config_path()?;
        Self::load(&config_path).await
    }

    /// `~/.brujula/config.json`
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        crate::default_config_path()
            .ok_or_else(|| ConfigError::InvalidPath("Could not find home directory".to_string()))
    }

    /// Wrap an in-memory config without touching disk
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(config)),
        }
    }

    pub fn get(&self) -> Arc<RwLock<Config>> {
        Arc::clone(&self.config)
    }

    /// Clone of the current config
    pub async fn snapshot(&self) -> Config {
        self.config.read().await.clone()
    }

    pub async fn save(&self) -> ConfigResult<()> {
        self.save_to(&self.path).await?;
        info!("Config saved to {:?}", self.path);
        Ok(())
    }

    pub async fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config = self.config.read().await;
        let content = serde_json::to_string_pretty(&*config)?;
        drop(config);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(path, content).await?;
        Ok(())
    }

    pub async fn reload(&self) -> ConfigResult<()> {
        if !self.path.exists() {
            return Err(ConfigError::InvalidPath(format!(
                "Config file not found: {:?}",
                self.path
            )));
        }

        let new_config = Self::read(&self.path).await?;

        let mut config = self.config.write().await;
        *config = new_config;
        drop(config);

        info!("Config reloaded from {:?}", self.path);
        Ok(())
    }

    /// Apply `f`, validate the result and persist it. The in-memory config is
    /// left untouched when validation fails.
    pub async fn update<F>(&self, f: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config) -> ConfigResult<()>,
    {
        let mut config = self.config.write().await;
        let mut candidate = config.clone();
        f(&mut candidate)?;
        Self::validate(&candidate)?;
        *config = candidate;
        drop(config);
        self.save().await
    }

    pub fn validate(config: &Config) -> ConfigResult<()> {
        if !(1..=MAX_SUGGESTIONS).contains(&config.proactive.max_suggestions) {
            return Err(ConfigError::Validation(format!(
                "proactive.max_suggestions must be between 1 and {}, got {}",
                MAX_SUGGESTIONS, config.proactive.max_suggestions
            )));
        }

        if !(1..=MAX_RECENT_TOPICS).contains(&config.proactive.max_recent_topics) {
            return Err(ConfigError::Validation(format!(
                "proactive.max_recent_topics must be between 1 and {}, got {}",
                MAX_RECENT_TOPICS, config.proactive.max_recent_topics
            )));
        }

        if config.ai.thinking_delay_min_ms > config.ai.thinking_delay_max_ms {
            return Err(ConfigError::Validation(format!(
                "ai.thinking_delay_min_ms ({}) is greater than ai.thinking_delay_max_ms ({})",
                config.ai.thinking_delay_min_ms, config.ai.thinking_delay_max_ms
            )));
        }

        Ok(())
    }

    async fn read(path: &Path) -> ConfigResult<Config> {
        let content = tokio::fs::read_to_string(path).await?;
        let content = Self::expand_env_vars(&content)?;
        let config: Config = serde_json::from_str(&content)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Expand `${VAR}` and `${VAR:-default}`
    fn expand_env_vars(content: &str) -> ConfigResult<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::Validation(format!("Invalid pattern: {}", e)))?;
        let mut result = content.to_string();

        for cap in re.captures_iter(content) {
            let full_match = &cap[0];
            let var_expr = &cap[1];

            let (var_name, default_value) = match var_expr.split_once(":-") {
                Some((name, default)) => (name, Some(default)),
                None => (var_expr, None),
            };

            let replacement = match std::env::var(var_name) {
                Ok(val) => val,
                Err(_) => match default_value {
                    Some(default) => default.to_string(),
                    None => return Err(ConfigError::EnvVarNotFound(var_name.to_string())),
                },
            };

            result = result.replace(full_match, &replacement);
        }

        Ok(result)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brujula_core::AssistantProfile;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_creates_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.json");

        let manager = ConfigManager::load(&config_path).await.unwrap();
        let config = manager.snapshot().await;

        assert!(config_path.exists());
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_env_var_expansion() {
        std::env::set_var("BRUJULA_TEST_USER", "Valentina");

        let content = r#"{"user": "${BRUJULA_TEST_USER}", "region": "${BRUJULA_TEST_UNSET:-Cali}"}"#;
        let expanded = ConfigManager::expand_env_vars(content).unwrap();

        assert!(expanded.contains("Valentina"));
        assert!(expanded.contains("Cali"));
        assert!(matches!(
            ConfigManager::expand_env_vars("${BRUJULA_TEST_MISSING}"),
            Err(ConfigError::EnvVarNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_config_validation() {
        let mut config = Config::default();
        config.proactive.max_suggestions = 0;
        assert!(ConfigManager::validate(&config).is_err());

        config.proactive.max_suggestions = 3;
        config.ai.thinking_delay_min_ms = 3000;
        assert!(ConfigManager::validate(&config).is_err());

        config.ai.thinking_delay_max_ms = 3000;
        assert!(ConfigManager::validate(&config).is_ok());
    }

    #[tokio::test]
    async fn test_caps_above_engine_limits_are_rejected() {
        let mut config = Config::default();
        config.proactive.max_recent_topics = 10;
        assert!(ConfigManager::validate(&config).is_err());

        config.proactive.max_recent_topics = 5;
        config.proactive.max_suggestions = 4;
        assert!(ConfigManager::validate(&config).is_err());

        config.proactive.max_suggestions = 3;
        assert!(ConfigManager::validate(&config).is_ok());

        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::load(&temp_dir.path().join("config.json")).await.unwrap();
        let result = manager
            .update(|c| c.set_value("proactive.max_suggestions", "10"))
            .await;
        assert!(matches!(result, Err(ConfigError::Validation(_))));
        assert_eq!(manager.snapshot().await.proactive.max_suggestions, 3);
    }

    #[tokio::test]
    async fn test_update_persists_and_reloads() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let manager = ConfigManager::load(&config_path).await.unwrap();

        manager
            .update(|config| config.set_value("assistant.profile", "tause_pro"))
            .await
            .unwrap();

        let reloaded = ConfigManager::load(&config_path).await.unwrap();
        assert_eq!(
            reloaded.snapshot().await.assistant.profile,
            AssistantProfile::TausePro
        );
    }

    #[tokio::test]
    async fn test_invalid_update_is_not_applied() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::new(Config::default(), temp_dir.path().join("config.json"));

        let result = manager
            .update(|config| config.set_value("proactive.max_recent_topics", "0"))
            .await;

        assert!(result.is_err());
        assert_eq!(manager.snapshot().await.proactive.max_recent_topics, 5);
    }
}
