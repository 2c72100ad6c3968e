use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use crate::session::ContextSnapshot;
use crate::{ProactiveError, ProactiveResult};

/// JSON file store for context snapshots, one `<session_id>.json` per session
#[derive(Debug, Clone)]
pub struct ContextStorage {
    root: PathBuf,
}

impl ContextStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn init(&self) -> ProactiveResult<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    pub fn path_for_session(&self, session_id: &str) -> ProactiveResult<PathBuf> {
        let valid = !session_id.is_empty()
            && session_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ProactiveError::InvalidSessionId(session_id.to_string()));
        }
        Ok(self.root.join(format!("{}.json", session_id)))
    }

    /// Load a snapshot, or a fresh one if the session was never saved
    pub async fn load(&self, session_id: &str) -> ProactiveResult<ContextSnapshot> {
        let path = self.path_for_session(session_id)?;
        match fs::read_to_string(&path).await {
            Ok(content) => {
                debug!("Loaded context snapshot from {:?}", path);
                Ok(serde_json::from_str(&content)?)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(ContextSnapshot::new(session_id))
            }
            Err(err) => Err(ProactiveError::Io(err)),
        }
    }

    pub async fn save(&self, snapshot: &ContextSnapshot) -> ProactiveResult<()> {
        self.init().await?;
        let path = self.path_for_session(&snapshot.session_id)?;
        let content = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, content).await?;
        info!("Context snapshot saved to {:?}", path);
        Ok(())
    }

    /// Returns false if there was nothing to delete
    pub async fn delete(&self, session_id: &str) -> ProactiveResult<bool> {
        let path = self.path_for_session(session_id)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(ProactiveError::Io(err)),
        }
    }

    /// Ids of all saved sessions, sorted
    pub async fn list(&self) -> ProactiveResult<Vec<String>> {
        self.init().await?;
        let mut ids = Vec::new();
        let mut dir = fs::read_dir(&self.root).await?;

        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }

        ids.sort();
        Ok(ids)
    }
}
