//! Entities - phone-number extraction from chat messages
//!
//! Customers paste phone numbers mid-sentence ("check my points for
//! +263775123456 please"), so the gateway scans every inbound message and
//! remembers the first phone-shaped substring it finds.

use regex::Regex;
use std::sync::LazyLock;

/// International phone shape: optional `+`, first digit 1-9, 2-15 digits
/// total. Loose on purpose; the executor re-validates before dispatch.
static EXTRACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?[1-9]\d{1,14}").expect("EXTRACT_RE is a compile-time constant")
});

/// Find the first phone-number-shaped substring in a message, if any.
#[must_use]
pub fn extract_phone_number(message: &str) -> Option<String> {
    EXTRACT_RE
        .find(message)
        .map(|m| m.as_str().to_string())
}
