//! Form field validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

// International phone number regex (E.164 format)
static INTERNATIONAL_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{6,14}$").unwrap()
});

/// Check if a string is not blank
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check if a password meets the minimum length (counted in characters)
pub fn is_strong_enough_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is valid (international E.164 format)
pub fn is_valid_phone(phone: &str) -> bool {
    INTERNATIONAL_PHONE_REGEX.is_match(&normalize_phone_number(phone))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Jane"));
        assert!(!not_blank("   "));
        assert!(!not_blank(""));
    }

    #[test]
    fn test_password_length_counts_characters() {
        assert!(is_strong_enough_password("correct horse"));
        assert!(is_strong_enough_password("pässwörd"));
        assert!(!is_strong_enough_password("short"));
    }

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("+1 (415) 555-2671"), "+14155552671");
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("+14155552671"));
        assert!(is_valid_phone("+44 20 7183 8750"));
        assert!(!is_valid_phone("4155552671"));
        assert!(!is_valid_phone("+0123456789"));
        assert!(!is_valid_phone("+12"));
    }
}
