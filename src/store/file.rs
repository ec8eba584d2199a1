//! JSON file session store.
//!
//! All sessions live in one JSON object keyed by session id. Every operation
//! reloads the file, so edits made by another process are picked up; writes
//! go to a sibling temp file that is then renamed over the original.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::traits::{SessionRecord, SessionStore, Turn};
use crate::error::StoreError;
use crate::persona::ConversationState;

type Sessions = HashMap<String, SessionRecord>;

/// Session store persisted as a single JSON document.
pub struct JsonFileSessionStore {
    path: PathBuf,
    /// Serialises load-modify-save cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Sessions, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Sessions::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Sessions::new()),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read session file");
                Err(StoreError::Unavailable {
                    reason: format!("cannot read {}: {e}", self.path.display()),
                })
            }
        }
    }

    async fn save(&self, sessions: &Sessions) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec(sessions)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), sessions = sessions.len(), "Session file saved");
        Ok(())
    }

    async fn update<F>(&self, session_id: &str, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut SessionRecord) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut sessions = self.load().await?;
        f(sessions.entry(session_id.to_string()).or_default());
        self.save(&sessions).await
    }

    async fn record(&self, session_id: &str) -> Result<SessionRecord, StoreError> {
        let _guard = self.lock.lock().await;
        let mut sessions = self.load().await?;
        Ok(sessions.remove(session_id).unwrap_or_default())
    }
}

#[async_trait]
impl SessionStore for JsonFileSessionStore {
    async fn get_history(&self, session_id: &str) -> Result<Vec<Turn>, StoreError> {
        Ok(self.record(session_id).await?.history)
    }

    async fn get_state(&self, session_id: &str) -> Result<ConversationState, StoreError> {
        Ok(self.record(session_id).await?.state)
    }

    async fn set_state(
        &self,
        session_id: &str,
        state: ConversationState,
    ) -> Result<(), StoreError> {
        self.update(session_id, |record| record.state = state).await
    }

    async fn append_turn(
        &self,
        session_id: &str,
        inbound: &str,
        reply: &str,
    ) -> Result<(), StoreError> {
        let turn = Turn::new(inbound, reply);
        self.update(session_id, move |record| record.history.push(turn))
            .await
    }
}
