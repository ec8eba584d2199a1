//! Turn orchestrator — classify, extract, move the persona, reply.
//!
//! Non-scam messages short-circuit: no extraction runs and session state is
//! neither read nor written. For scams the surfaced extraction is filtered
//! twice: once at extraction time (phone-shaped numbers are not accounts) and
//! again here (any phone hides the whole account category).

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persona::{ACKNOWLEDGMENT, ReplyGenerator, next_state};
use crate::pipeline::extract::extract;
use crate::pipeline::rules::classify;
use crate::pipeline::types::{Message, SurfacedIntel};
use crate::store::{SessionStore, Turn};

/// Session key used when neither the message nor the history names one.
pub const DEFAULT_SESSION_KEY: &str = "default";

/// Outcome of one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentTurnResult {
    pub scam: bool,
    pub reply: String,
    pub extracted: SurfacedIntel,
}

/// Key under which persona state is stored for this turn.
///
/// The message's own session id when present, otherwise the first recorded
/// inbound text, otherwise [`DEFAULT_SESSION_KEY`].
pub fn session_key<'a>(message: &'a Message, history: &'a [Turn]) -> &'a str {
    if !message.session_id.trim().is_empty() {
        return &message.session_id;
    }
    history
        .first()
        .map(|turn| turn.inbound.as_str())
        .unwrap_or(DEFAULT_SESSION_KEY)
}

/// Runs the per-message pipeline against a session store.
///
/// Holds no session state between calls. Callers must not run two turns for
/// the same session concurrently: state is read, recomputed and written back
/// without a per-session lock.
pub struct TurnOrchestrator {
    store: Arc<dyn SessionStore>,
    replies: ReplyGenerator,
}

impl TurnOrchestrator {
    pub fn new(store: Arc<dyn SessionStore>, replies: ReplyGenerator) -> Self {
        Self { store, replies }
    }

    /// Process one inbound message given the session's prior turns.
    pub async fn handle_turn(
        &self,
        message: &Message,
        history: &[Turn],
    ) -> Result<AgentTurnResult, StoreError> {
        let Some(rule) = classify(&message.text) else {
            debug!(session_id = %message.session_id, "Not a scam, acknowledging");
            return Ok(AgentTurnResult {
                scam: false,
                reply: ACKNOWLEDGMENT.to_string(),
                extracted: SurfacedIntel::default(),
            });
        };

        let extraction = extract(&message.text);
        let turn_count = history.len();
        let key = session_key(message, history);

        let prior = self.store.get_state(key).await?;
        let state = next_state(prior, &extraction, turn_count);
        self.store.set_state(key, state).await?;

        let reply = self.replies.reply(state);
        let extracted = extraction.non_empty_fields().prefer_phones();

        info!(
            session_id = %key,
            rule = rule.label(),
            from = %prior,
            to = %state,
            turn_count,
            artifacts = extracted.artifact_count(),
            "Scam turn handled"
        );

        Ok(AgentTurnResult {
            scam: true,
            reply,
            extracted,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::persona::ConversationState;
    use crate::persona::replies::pool;
    use crate::store::InMemorySessionStore;

    /// Wraps the in-memory store and counts state accesses.
    #[derive(Default)]
    struct CountingStore {
        inner: InMemorySessionStore,
        state_reads: AtomicUsize,
        state_writes: AtomicUsize,
    }

    #[async_trait]
    impl SessionStore for CountingStore {
        async fn get_history(&self, session_id: &str) -> Result<Vec<Turn>, StoreError> {
            self.inner.get_history(session_id).await
        }
        async fn get_state(&self, session_id: &str) -> Result<ConversationState, StoreError> {
            self.state_reads.fetch_add(1, Ordering::SeqCst);
            self.inner.get_state(session_id).await
        }
        async fn set_state(
            &self,
            session_id: &str,
            state: ConversationState,
        ) -> Result<(), StoreError> {
            self.state_writes.fetch_add(1, Ordering::SeqCst);
            self.inner.set_state(session_id, state).await
        }
        async fn append_turn(
            &self,
            session_id: &str,
            inbound: &str,
            reply: &str,
        ) -> Result<(), StoreError> {
            self.inner.append_turn(session_id, inbound, reply).await
        }
    }

    /// Store whose backend is gone.
    struct DownStore;

    #[async_trait]
    impl SessionStore for DownStore {
        async fn get_history(&self, _: &str) -> Result<Vec<Turn>, StoreError> {
            Err(down())
        }
        async fn get_state(&self, _: &str) -> Result<ConversationState, StoreError> {
            Err(down())
        }
        async fn set_state(&self, _: &str, _: ConversationState) -> Result<(), StoreError> {
            Err(down())
        }
        async fn append_turn(&self, _: &str, _: &str, _: &str) -> Result<(), StoreError> {
            Err(down())
        }
    }

    fn down() -> StoreError {
        StoreError::Unavailable {
            reason: "backend offline".into(),
        }
    }

    fn orchestrator() -> (TurnOrchestrator, Arc<CountingStore>) {
        let store = Arc::new(CountingStore::default());
        let orch = TurnOrchestrator::new(store.clone(), ReplyGenerator::seeded(99));
        (orch, store)
    }

    fn history(n: usize) -> Vec<Turn> {
        (0..n).map(|i| Turn::new(format!("msg {i}"), "reply")).collect()
    }

    async fn state_of(store: &CountingStore, session: &str) -> ConversationState {
        store.inner.get_state(session).await.unwrap()
    }

    #[tokio::test]
    async fn upi_payment_request() {
        let (orch, store) = orchestrator();
        let msg = Message::new("s1", "Send ₹1 to 9876543210@okicici", 0);
        let result = orch.handle_turn(&msg, &[]).await.unwrap();

        assert!(result.scam);
        assert_eq!(
            result.extracted.upi_handles,
            Some(vec!["9876543210@okicici".to_string()])
        );
        assert_eq!(state_of(&store, "s1").await, ConversationState::Verifying);
        assert!(pool(ConversationState::Verifying).contains(&result.reply.as_str()));
    }

    #[tokio::test]
    async fn link_makes_persona_cooperative() {
        let (orch, store) = orchestrator();
        let msg = Message::new("s2", "Click http://tinyurl.com/fake", 0);
        let result = orch.handle_turn(&msg, &[]).await.unwrap();

        assert!(result.scam);
        assert_eq!(
            result.extracted.links,
            Some(vec!["http://tinyurl.com/fake".to_string()])
        );
        assert_eq!(state_of(&store, "s2").await, ConversationState::Cooperative);
        assert!(pool(ConversationState::Cooperative).contains(&result.reply.as_str()));
    }

    #[tokio::test]
    async fn blocked_account_number() {
        let (orch, store) = orchestrator();
        let msg = Message::new("s3", "Your account 12345678901 is blocked", 0);
        let result = orch.handle_turn(&msg, &[]).await.unwrap();

        assert!(result.scam);
        assert_eq!(
            result.extracted.bank_accounts,
            Some(vec!["12345678901".to_string()])
        );
        assert!(result.extracted.phones.is_none());
        assert_eq!(state_of(&store, "s3").await, ConversationState::Verifying);
    }

    #[tokio::test]
    async fn phone_shaped_transfer_target() {
        let (orch, store) = orchestrator();
        let msg = Message::new("s4", "Transfer to 9876543210", 0);
        let result = orch.handle_turn(&msg, &[]).await.unwrap();

        assert!(result.scam);
        assert_eq!(result.extracted.phones, Some(vec!["9876543210".to_string()]));
        assert!(result.extracted.bank_accounts.is_none());
        // a phone is not a payment detail, so the persona stays confused
        assert_eq!(state_of(&store, "s4").await, ConversationState::Confused);
    }

    #[tokio::test]
    async fn phone_hides_accounts_in_surfaced_result() {
        let (orch, _store) = orchestrator();
        let msg = Message::new("s5", "call +919876543210 or pay 12345678901", 0);
        let result = orch.handle_turn(&msg, &[]).await.unwrap();

        assert!(result.extracted.phones.is_some());
        assert!(result.extracted.bank_accounts.is_none());
        let json = serde_json::to_value(&result.extracted).unwrap();
        assert!(json.get("bank_accounts").is_none());
    }

    #[tokio::test]
    async fn greeting_is_acknowledged_without_touching_state() {
        let (orch, store) = orchestrator();
        store
            .inner
            .set_state("s6", ConversationState::Stalling)
            .await
            .unwrap();

        let msg = Message::new("s6", "Hello, how are you?", 3);
        let result = orch.handle_turn(&msg, &history(3)).await.unwrap();

        assert!(!result.scam);
        assert_eq!(result.reply, ACKNOWLEDGMENT);
        assert!(result.extracted.is_empty());
        assert_eq!(store.state_reads.load(Ordering::SeqCst), 0);
        assert_eq!(store.state_writes.load(Ordering::SeqCst), 0);
        assert_eq!(state_of(&store, "s6").await, ConversationState::Stalling);
    }

    #[tokio::test]
    async fn long_conversation_stalls() {
        let (orch, store) = orchestrator();
        let msg = Message::new("s7", "This is urgent", 7);
        orch.handle_turn(&msg, &history(7)).await.unwrap();
        assert_eq!(state_of(&store, "s7").await, ConversationState::Stalling);

        let msg = Message::new("s8", "This is urgent", 6);
        orch.handle_turn(&msg, &history(6)).await.unwrap();
        assert_eq!(state_of(&store, "s8").await, ConversationState::Confused);
    }

    #[tokio::test]
    async fn state_is_rederived_every_turn() {
        let (orch, store) = orchestrator();
        let first = Message::new("s9", "Pay to crook@ybl", 0);
        orch.handle_turn(&first, &[]).await.unwrap();
        assert_eq!(state_of(&store, "s9").await, ConversationState::Verifying);

        let second = Message::new("s9", "urgent reply", 1);
        orch.handle_turn(&second, &history(1)).await.unwrap();
        assert_eq!(state_of(&store, "s9").await, ConversationState::Confused);
    }

    #[tokio::test]
    async fn blank_session_falls_back_to_first_turn_then_default() {
        let turns = history(2);
        let anon = Message::new("  ", "urgent", 2);
        assert_eq!(session_key(&anon, &turns), "msg 0");
        assert_eq!(session_key(&anon, &[]), DEFAULT_SESSION_KEY);

        let named = Message::new("abc", "urgent", 2);
        assert_eq!(session_key(&named, &turns), "abc");

        let (orch, store) = orchestrator();
        orch.handle_turn(&Message::new("", "Click http://x.io", 0), &[])
            .await
            .unwrap();
        assert_eq!(
            state_of(&store, DEFAULT_SESSION_KEY).await,
            ConversationState::Cooperative
        );
    }

    #[tokio::test]
    async fn store_failure_fails_scam_turn() {
        let orch = TurnOrchestrator::new(Arc::new(DownStore), ReplyGenerator::seeded(1));
        let err = orch
            .handle_turn(&Message::new("s", "urgent kyc", 0), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn store_failure_does_not_affect_non_scam_turn() {
        let orch = TurnOrchestrator::new(Arc::new(DownStore), ReplyGenerator::seeded(1));
        let result = orch
            .handle_turn(&Message::new("s", "good morning", 0), &[])
            .await
            .unwrap();
        assert!(!result.scam);
    }

    #[tokio::test]
    async fn empty_message_is_not_a_scam() {
        let (orch, _store) = orchestrator();
        let result = orch.handle_turn(&Message::new("s", "", 0), &[]).await.unwrap();
        assert!(!result.scam);
        assert_eq!(result.reply, ACKNOWLEDGMENT);
    }
}
