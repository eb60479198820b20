//! Format rule for mobile numbers: `01` followed by ASCII digits only.

use crate::error::ValidationError;

pub fn is_valid_mobile(value: &str) -> bool {
    match value.strip_prefix("01") {
        Some(rest) => rest.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

pub fn check_mobile(value: &str) -> Result<(), ValidationError> {
    if is_valid_mobile(value) {
        Ok(())
    } else {
        Err(ValidationError)
    }
}

/// Drop everything that is not an ASCII digit, as the mobile inputs do
/// while typing.
pub fn sanitize_mobile(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_prefix_followed_by_digits() {
        assert!(is_valid_mobile("01"));
        assert!(is_valid_mobile("017"));
        assert!(is_valid_mobile("01700000000"));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!is_valid_mobile(""));
        assert!(!is_valid_mobile("0"));
        assert!(!is_valid_mobile("1700"));
        assert!(!is_valid_mobile("017a"));
        assert!(!is_valid_mobile("9001"));
        assert!(!is_valid_mobile(" 017"));
        assert!(!is_valid_mobile("017 "));
        // Non-ASCII digits do not count.
        assert!(!is_valid_mobile("01٣"));
    }

    #[test]
    fn check_mobile_maps_to_validation_error() {
        assert_eq!(check_mobile("017001"), Ok(()));
        assert_eq!(check_mobile("9001"), Err(ValidationError));
    }

    #[test]
    fn sanitize_keeps_ascii_digits_only() {
        assert_eq!(sanitize_mobile("017-00 12a"), "0170012");
        assert_eq!(sanitize_mobile("abc"), "");
    }
}
