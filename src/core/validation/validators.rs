//! Custom field validators
//!
//! Used from `#[validate(custom(function = ...))]` attributes on form structs.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use validator::ValidationError;

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Validator: value contains something other than whitespace
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(rule_error("required", "This field is required."))
    } else {
        Ok(())
    }
}

/// Validator: value is an ISBN-13, i.e. exactly 13 digits
pub fn isbn13(value: &str) -> Result<(), ValidationError> {
    static ISBN_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = ISBN_REGEX.get_or_init(|| Regex::new(r"^\d{13}$").unwrap());
    if regex.is_match(value) {
        Ok(())
    } else {
        Err(rule_error("isbn13", "ISBN-13 must be exactly 13 digits."))
    }
}

/// Validator: username made of letters, digits and @/./+/-/_
pub fn username(value: &str) -> Result<(), ValidationError> {
    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX.get_or_init(|| Regex::new(r"^[\w.@+-]+$").unwrap());
    if regex.is_match(value) {
        Ok(())
    } else {
        Err(rule_error(
            "username",
            "Enter a valid username. It may contain only letters, numbers, and @/./+/-/_ characters.",
        ))
    }
}

/// Validator: avatar reference is a relative path inside the media root
pub fn media_path(value: &str) -> Result<(), ValidationError> {
    let escapes = value.starts_with('/')
        || value.starts_with('\\')
        || value.split(['/', '\\']).any(|part| part == "..");
    if value.is_empty() || escapes {
        Err(rule_error(
            "media_path",
            "Avatar must be a relative path inside the media directory.",
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("x").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_isbn13() {
        assert!(isbn13("9780132350884").is_ok());
        assert!(isbn13("978013235088").is_err());
        assert!(isbn13("978-0132350884").is_err());
        assert!(isbn13("97801323508845").is_err());
    }

    #[test]
    fn test_username() {
        assert!(username("ann").is_ok());
        assert!(username("ann.lee+books@x").is_ok());
        assert!(username("ann lee").is_err());
    }

    #[test]
    fn test_media_path() {
        assert!(media_path("avatars/ann.png").is_ok());
        assert!(media_path("/etc/passwd").is_err());
        assert!(media_path("avatars/../../secret").is_err());
        assert!(media_path("").is_err());
    }

    #[test]
    fn test_error_carries_message() {
        let err = isbn13("nope").unwrap_err();
        assert_eq!(err.code, "isbn13");
        assert!(err.message.unwrap().contains("13 digits"));
    }
}
