//! Compiled artifact patterns shared by the classifier and the extractor.

use std::sync::LazyLock;

use regex::Regex;

/// `name@provider` payment handle.
pub static UPI_HANDLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9.\-_]{2,}@[a-zA-Z]{2,}").expect("upi handle pattern")
});

/// Email-shaped token; looser than a handle (one character local part is enough).
pub static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9.\-_]+@[a-zA-Z]{2,}").expect("email pattern"));

/// URL scheme prefix.
pub static URL_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://").expect("url scheme pattern"));

/// Full link: scheme plus everything up to the next whitespace.
pub static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("link pattern"));

/// Indian mobile number: optional `+91` (space or hyphen allowed), then 6–9 and nine digits.
pub static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\+91[\s\-]?)?[6-9]\d{9}").expect("phone pattern"));

/// Word-bounded 9–18 digit run.
pub static LONG_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{9,18}\b").expect("long number pattern"));

/// All non-overlapping matches of `re` in `text`, in order.
pub fn find_all(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}
