//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic address check: one `@`, no whitespace, a dotted domain
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$").unwrap()
});

/// Normalize an email address for submission (trimmed, lowercased)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address is syntactically valid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Mask an email address for logs (e.g., jo****@clinic.org)
pub fn mask_email(email: &str) -> String {
    match email.trim().split_once('@') {
        Some((local, domain)) if !domain.is_empty() => {
            let visible: String = local.chars().take(2).collect();
            format!("{}****@{}", visible, domain)
        }
        _ => "****".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("jane.doe@clinic.org"));
        assert!(is_valid_email("dr+oncall@st-marys.hospital.co.uk"));
        assert!(is_valid_email("  padded@clinic.org "));
        assert!(!is_valid_email("jane.doe"));
        assert!(!is_valid_email("jane@localhost"));
        assert!(!is_valid_email("jane doe@clinic.org"));
        assert!(!is_valid_email("@clinic.org"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jane.Doe@Clinic.ORG "), "jane.doe@clinic.org");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("jane.doe@clinic.org"), "ja****@clinic.org");
        assert_eq!(mask_email("j@clinic.org"), "j****@clinic.org");
        assert_eq!(mask_email("not-an-email"), "****");
    }
}
