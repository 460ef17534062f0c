//! Phone number validation
//!
//! The same loose international-format check is applied to direct user input
//! and to phone numbers the model supplies inside tool arguments. Model
//! output is untrusted input.

use regex::Regex;
use std::sync::LazyLock;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{9,15}$").expect("PHONE_RE is a compile-time constant"));

/// Check whether a string looks like an international phone number
/// (optional leading `+`, 9-15 digits).
#[must_use]
pub fn is_valid_phone(candidate: &str) -> bool {
    PHONE_RE.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_international_format() {
        assert!(is_valid_phone("+263775123456"));
        assert!(is_valid_phone("263775123456"));
        assert!(is_valid_phone("+123456789"));
    }

    #[test]
    fn test_rejects_malformed_numbers() {
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("+12345678")); // too short
        assert!(!is_valid_phone("+1234567890123456")); // too long
        assert!(!is_valid_phone("077-512-3456")); // separators
        assert!(!is_valid_phone("call me maybe"));
    }
}
