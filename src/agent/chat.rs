//! Chat service — the Turn API behind the HTTP transport.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::orchestrator::TurnOrchestrator;
use crate::error::Result;
use crate::metrics::{MetricsSink, TurnReport};
use crate::persona::ReplyGenerator;
use crate::pipeline::types::{Message, SurfacedIntel};
use crate::store::{SessionStore, Turn};

/// Inbound request: one message for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

/// Response returned to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub scam: bool,
    pub extracted: SurfacedIntel,
}

/// Loads history, runs the turn, records it, reports it.
pub struct ChatService {
    store: Arc<dyn SessionStore>,
    orchestrator: TurnOrchestrator,
    metrics: Arc<dyn MetricsSink>,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn SessionStore>,
        replies: ReplyGenerator,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        let orchestrator = TurnOrchestrator::new(Arc::clone(&store), replies);
        Self {
            store,
            orchestrator,
            metrics,
        }
    }

    /// Handle one request end to end.
    ///
    /// Every exchange is appended to the history, scam or not. Only scam turns
    /// move the persona state.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let history = self.store.get_history(&request.session_id).await?;
        let message = Message::new(
            request.session_id.as_str(),
            request.message.as_str(),
            history.len() as u64,
        );

        let result = self.orchestrator.handle_turn(&message, &history).await?;

        self.store
            .append_turn(&request.session_id, &request.message, &result.reply)
            .await?;

        self.metrics.record(TurnReport {
            session_id: request.session_id,
            scam: result.scam,
            extracted: result.extracted.clone(),
            message_count: history.len() + 1,
            engagement: engagement_since(&history),
        });

        Ok(ChatResponse {
            reply: result.reply,
            scam: result.scam,
            extracted: result.extracted,
        })
    }
}

fn engagement_since(history: &[Turn]) -> Duration {
    let Some(first) = history.first() else {
        return Duration::ZERO;
    };
    (Utc::now() - first.at).to_std().unwrap_or_else(|e| {
        warn!(error = %e, "First turn is in the future, reporting zero engagement");
        Duration::ZERO
    })
}
