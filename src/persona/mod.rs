//! Simulated-victim persona: state machine and reply pools.

pub mod replies;
pub mod state;

pub use replies::{ACKNOWLEDGMENT, ReplyGenerator};
pub use state::{ConversationState, next_state};
