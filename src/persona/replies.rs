//! Canned replies for each persona state.

use std::sync::Mutex;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::state::ConversationState;

/// Sent instead of a persona reply when a message is not a scam.
pub const ACKNOWLEDGMENT: &str = "Okay, thanks for letting me know.";

const CONFUSED: &[&str] = &[
    "Wait… I don't understand. Can you explain slowly?",
    "Sorry I'm not good with phones. What should I do?",
    "This message scared me… is it real?",
    "My son usually handles this. Tell again?",
];

const COOPERATIVE: &[&str] = &[
    "Okay okay… what do you need from me?",
    "I'm trying to do it, tell me next step",
    "It's asking details… is this safe?",
];

const VERIFYING: &[&str] = &[
    "Before sending, can you confirm once?",
    "I see something, is this correct?",
    "This looks risky… are you sure?",
];

const STALLING: &[&str] = &[
    "My phone is hanging, wait",
    "Network issue, one minute",
    "Battery low, I'll reply",
];

/// Reply pool for a state.
pub fn pool(state: ConversationState) -> &'static [&'static str] {
    match state {
        ConversationState::Confused => CONFUSED,
        ConversationState::Cooperative => COOPERATIVE,
        ConversationState::Verifying => VERIFYING,
        ConversationState::Stalling => STALLING,
    }
}

/// Picks replies uniformly at random, with replacement.
///
/// The random source is owned here so callers can seed it for reproducible
/// conversations.
pub struct ReplyGenerator {
    rng: Mutex<StdRng>,
}

impl ReplyGenerator {
    /// Create a generator over an existing random source.
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Deterministic generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Sample one utterance for `state`.
    pub fn reply(&self, state: ConversationState) -> String {
        let options = pool(state);
        // a poisoned lock still holds a usable rng
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        options
            .choose(&mut *rng)
            .copied()
            .unwrap_or(ACKNOWLEDGMENT)
            .to_string()
    }
}

impl Default for ReplyGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}
