//! `SessionStore` trait — the only way the core touches session state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::persona::ConversationState;

/// One recorded exchange: what the scammer sent and what we answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub inbound: String,
    pub reply: String,
    pub at: DateTime<Utc>,
}

impl Turn {
    pub fn new(inbound: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            inbound: inbound.into(),
            reply: reply.into(),
            at: Utc::now(),
        }
    }
}

/// Everything persisted for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub history: Vec<Turn>,
    #[serde(default)]
    pub state: ConversationState,
}

/// Backend-agnostic session persistence.
///
/// Implementations must give read-your-writes consistency within a session.
/// They do not serialise whole turns: callers run at most one turn per
/// session at a time.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Recorded turns, oldest first. Unknown sessions have no history.
    async fn get_history(&self, session_id: &str) -> Result<Vec<Turn>, StoreError>;

    /// Current persona state. Unknown sessions are `Confused`.
    async fn get_state(&self, session_id: &str) -> Result<ConversationState, StoreError>;

    /// Overwrite the persona state.
    async fn set_state(
        &self,
        session_id: &str,
        state: ConversationState,
    ) -> Result<(), StoreError>;

    /// Append one exchange to the history.
    async fn append_turn(
        &self,
        session_id: &str,
        inbound: &str,
        reply: &str,
    ) -> Result<(), StoreError>;
}
