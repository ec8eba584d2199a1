//! In-memory session store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::traits::{SessionRecord, SessionStore, Turn};
use crate::error::StoreError;
use crate::persona::ConversationState;

/// Session store that lives for the lifetime of the process.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions seen so far.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_history(&self, session_id: &str) -> Result<Vec<Turn>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(session_id)
            .map(|s| s.history.clone())
            .unwrap_or_default())
    }

    async fn get_state(&self, session_id: &str) -> Result<ConversationState, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(session_id)
            .map(|s| s.state)
            .unwrap_or_default())
    }

    async fn set_state(
        &self,
        session_id: &str,
        state: ConversationState,
    ) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.entry(session_id.to_string()).or_default().state = state;
        debug!(session_id, %state, "Session state updated");
        Ok(())
    }

    async fn append_turn(
        &self,
        session_id: &str,
        inbound: &str,
        reply: &str,
    ) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .history
            .push(Turn::new(inbound, reply));
        Ok(())
    }
}
