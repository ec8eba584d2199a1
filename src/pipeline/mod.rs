//! Inbound message pipeline.
//!
//! Every scam-suspect message flows through:
//! 1. `rules::classify()` — ordered pattern rules, boolean verdict
//! 2. `extract::extract()` — handles, links, phones, account numbers
//!
//! Both stages are pure functions of the message text.

pub mod extract;
pub mod patterns;
pub mod rules;
pub mod types;

pub use extract::extract;
pub use rules::{ScamRule, classify, is_scam};
pub use types::{ExtractionResult, Message, SurfacedIntel};
