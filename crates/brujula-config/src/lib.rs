pub mod config;
pub mod manager;

pub use config::{
    AiConfig, AssistantConfig, Config, ConfigError, ConfigResult, LogLevel, LoggingConfig,
    ProactiveConfig, StorageConfig,
};
pub use manager::ConfigManager;

use std::path::PathBuf;

/// `~/.brujula`
pub fn brujula_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".brujula"))
}

pub fn default_config_path() -> Option<PathBuf> {
    brujula_dir().map(|dir| dir.join("config.json"))
}

pub fn default_context_dir() -> Option<PathBuf> {
    brujula_dir().map(|dir| dir.join("context"))
}

pub fn default_log_path() -> Option<PathBuf> {
    brujula_dir().map(|dir| dir.join("logs").join("brujula.log"))
}

/// Create the `~/.brujula` directory tree
pub async fn init_brujula_dirs() -> ConfigResult<()> {
    if let Some(root) = brujula_dir() {
        tokio::fs::create_dir_all(&root).await?;
        tokio::fs::create_dir_all(root.join("context")).await?;
        tokio::fs::create_dir_all(root.join("logs")).await?;
    }
    Ok(())
}

/// Expand a leading `~/` to the home directory
pub fn expand_tilde(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(path)),
    }
}
