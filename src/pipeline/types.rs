//! Shared types for the inbound message pipeline.

use serde::{Deserialize, Serialize};

// ── Inbound message ─────────────────────────────────────────────────

/// One inbound message from a suspected scammer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Session the message belongs to.
    pub session_id: String,
    /// Raw message text, untouched.
    pub text: String,
    /// Position within the session (number of turns recorded before it).
    pub arrival: u64,
}

impl Message {
    pub fn new(session_id: impl Into<String>, text: impl Into<String>, arrival: u64) -> Self {
        Self {
            session_id: session_id.into(),
            text: text.into(),
            arrival,
        }
    }
}

// ── Extraction ──────────────────────────────────────────────────────

/// Candidate artifacts pulled from a single message.
///
/// Each list keeps first-occurrence order and duplicates. A number recognised
/// as a phone is never also listed under `bank_accounts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// `name@provider` payment handles.
    #[serde(rename = "upi")]
    pub upi_handles: Vec<String>,
    /// `http(s)://` links.
    pub links: Vec<String>,
    /// Indian-format phone numbers, `+91` prefix kept when present.
    pub phones: Vec<String>,
    /// 9–18 digit numbers that were not recognised as phones.
    pub bank_accounts: Vec<String>,
}

impl ExtractionResult {
    /// True when no category has any candidate.
    pub fn is_empty(&self) -> bool {
        self.upi_handles.is_empty()
            && self.links.is_empty()
            && self.phones.is_empty()
            && self.bank_accounts.is_empty()
    }

    /// Keep only the categories with at least one element.
    pub fn non_empty_fields(&self) -> SurfacedIntel {
        fn keep(values: &[String]) -> Option<Vec<String>> {
            (!values.is_empty()).then(|| values.to_vec())
        }

        SurfacedIntel {
            upi_handles: keep(&self.upi_handles),
            links: keep(&self.links),
            phones: keep(&self.phones),
            bank_accounts: keep(&self.bank_accounts),
        }
    }
}

/// Extraction as shown outside the core: absent categories are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfacedIntel {
    #[serde(rename = "upi", default, skip_serializing_if = "Option::is_none")]
    pub upi_handles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_accounts: Option<Vec<String>>,
}

impl SurfacedIntel {
    /// Phone findings outrank account findings: drop `bank_accounts` whenever
    /// any phone is present.
    pub fn prefer_phones(mut self) -> Self {
        if self.phones.as_ref().is_some_and(|p| !p.is_empty()) {
            self.bank_accounts = None;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.upi_handles.is_none()
            && self.links.is_none()
            && self.phones.is_none()
            && self.bank_accounts.is_none()
    }

    /// Number of surfaced artifacts across all categories.
    pub fn artifact_count(&self) -> usize {
        [
            &self.upi_handles,
            &self.links,
            &self.phones,
            &self.bank_accounts,
        ]
        .into_iter()
        .map(|v| v.as_ref().map_or(0, Vec::len))
        .sum()
    }
}
