//! Scam classifier — ordered pattern rules, first match wins.
//!
//! Rules run in a fixed priority order against the lowercased text:
//! - urgency/financial/threat keywords
//! - `http://` / `https://` links
//! - email-shaped tokens
//! - Indian phone numbers
//! - long digit runs next to a financial action word
//!
//! No score is computed; the first rule that fires decides the verdict.

use tracing::debug;

use super::patterns::{EMAIL_SHAPE, LONG_NUMBER, PHONE, URL_SCHEME};

/// Urgency, financial and threat vocabulary. Matched as substrings.
pub const SCAM_KEYWORDS: &[&str] = &[
    "blocked",
    "urgent",
    "verify",
    "kyc",
    "account",
    "payment",
    "transfer",
    "click",
    "call",
    "suspended",
    "warning",
    "final",
    "now",
    "immediately",
];

/// Words that turn a bare long number into a payment instruction.
pub const FINANCIAL_ACTIONS: &[&str] = &["transfer", "send", "pay", "deposit", "account"];

/// A single classification rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScamRule {
    Keyword,
    Link,
    EmailShape,
    PhoneNumber,
    NumberWithFinancialAction,
}

impl ScamRule {
    /// All rules in evaluation order.
    pub const ORDERED: [ScamRule; 5] = [
        ScamRule::Keyword,
        ScamRule::Link,
        ScamRule::EmailShape,
        ScamRule::PhoneNumber,
        ScamRule::NumberWithFinancialAction,
    ];

    /// Check this rule alone. `lowered` must already be lowercase.
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            Self::Keyword => SCAM_KEYWORDS.iter().any(|k| lowered.contains(k)),
            Self::Link => URL_SCHEME.is_match(lowered),
            Self::EmailShape => EMAIL_SHAPE.is_match(lowered),
            Self::PhoneNumber => PHONE.is_match(lowered),
            Self::NumberWithFinancialAction => {
                LONG_NUMBER.is_match(lowered)
                    && FINANCIAL_ACTIONS.iter().any(|w| lowered.contains(w))
            }
        }
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Link => "link",
            Self::EmailShape => "email_shape",
            Self::PhoneNumber => "phone_number",
            Self::NumberWithFinancialAction => "number_with_financial_action",
        }
    }
}

/// Return the first rule that fires on `text`, if any.
pub fn classify(text: &str) -> Option<ScamRule> {
    let lowered = text.to_lowercase();
    let hit = ScamRule::ORDERED
        .into_iter()
        .find(|rule| rule.matches(&lowered));
    if let Some(rule) = hit {
        debug!(rule = rule.label(), "Message matched scam rule");
    }
    hit
}

/// Boolean scam gate. Total over all strings; empty text is not a scam.
pub fn is_scam(text: &str) -> bool {
    classify(text).is_some()
}
