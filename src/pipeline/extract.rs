//! Artifact extraction — payment handles, links, phones, account numbers.
//!
//! A ten-digit mobile number is also a valid account-number shape. Any long
//! number that is textually identical to a captured phone is dropped from the
//! account candidates, so phone detection takes precedence.

use super::patterns::{LINK, LONG_NUMBER, PHONE, UPI_HANDLE, find_all};
use super::types::ExtractionResult;

/// Pull every candidate artifact out of `text`.
///
/// Pure and total: the same input always yields the same output, and text
/// without matches (including the empty string) yields an empty result.
pub fn extract(text: &str) -> ExtractionResult {
    let upi_handles = find_all(&UPI_HANDLE, text);
    let links = find_all(&LINK, text);
    let phones = find_all(&PHONE, text);

    let bank_accounts = LONG_NUMBER
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|number| !phones.iter().any(|phone| phone == number))
        .map(str::to_string)
        .collect();

    ExtractionResult {
        upi_handles,
        links,
        phones,
        bank_accounts,
    }
}
