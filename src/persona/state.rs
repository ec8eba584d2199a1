//! Persona state machine — which disposition the simulated victim shows.

use serde::{Deserialize, Serialize};

use crate::pipeline::types::ExtractionResult;

/// History length past which an artifact-free conversation starts stalling.
pub const STALL_AFTER_TURNS: usize = 6;

/// The simulated victim's current disposition.
///
/// There is no terminal state; a session can move between any two states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    /// Does not understand, asks for explanations.
    #[default]
    Confused,
    /// Willing to follow instructions.
    Cooperative,
    /// About to pay, asks for confirmation of the details.
    Verifying,
    /// Playing for time.
    Stalling,
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Confused => "confused",
            Self::Cooperative => "cooperative",
            Self::Verifying => "verifying",
            Self::Stalling => "stalling",
        };
        write!(f, "{s}")
    }
}

/// Compute the next persona state.
///
/// Re-derived from this turn's signals, not from `prior`: whatever the
/// scammer just revealed drives the persona. Priority, first match wins:
/// payment details, then links, then conversation length.
pub fn next_state(
    _prior: ConversationState,
    extraction: &ExtractionResult,
    turn_count: usize,
) -> ConversationState {
    if !extraction.upi_handles.is_empty() || !extraction.bank_accounts.is_empty() {
        ConversationState::Verifying
    } else if !extraction.links.is_empty() {
        ConversationState::Cooperative
    } else if turn_count > STALL_AFTER_TURNS {
        ConversationState::Stalling
    } else {
        ConversationState::Confused
    }
}
