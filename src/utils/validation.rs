use axum::{http::StatusCode, Json};
use regex::Regex;
use serde_json::json;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{ValidationError, ValidationErrors};

static PINCODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^560\d{3}$").expect("Invalid pincode regex"));
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("Invalid phone regex"));

pub fn into_response(errors: ValidationErrors) -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({"errors": errors})))
}

/// Bangalore pincodes only.
pub fn validate_pincode(pincode: &str) -> Result<(), ValidationError> {
    match PINCODE_REGEX.is_match(pincode.trim()) {
        true => Ok(()),
        false => Err(ValidationError::new("INVALID_PINCODE")
            .with_message(Cow::from("Pincode must be a Bangalore pincode (e.g: 560001)"))),
    }
}

/// Ten digit Indian phone number. An empty value clears the phone.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();
    match phone.is_empty() || PHONE_REGEX.is_match(phone) {
        true => Ok(()),
        false => Err(ValidationError::new("INVALID_PHONE")
            .with_message(Cow::from("Phone number must have exactly 10 digits"))),
    }
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    match value.trim().is_empty() {
        false => Ok(()),
        true => Err(ValidationError::new("BLANK").with_message(Cow::from("Must not be blank"))),
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pincode_must_be_in_bangalore() {
        assert!(validate_pincode("560034").is_ok());
        assert!(validate_pincode(" 560001 ").is_ok());
        assert!(validate_pincode("110001").is_err());
        assert!(validate_pincode("5600341").is_err());
    }

    #[test]
    fn phone_allows_empty_or_ten_digits() {
        assert!(validate_phone("").is_ok());
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("+919876543210").is_err());
        assert!(validate_phone("98765").is_err());
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Jane@Example.COM "), "jane@example.com");
    }
}
