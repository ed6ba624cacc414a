//! Field checks shared by the entity constructors. They run before any
//! statement reaches the database.

use crate::errors::ModelError;

pub fn require_non_empty(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

pub fn validate_email(field: &str, value: &str) -> Result<(), ModelError> {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ModelError::validation(format!("{field} must be a valid email"))),
    }
}

pub fn validate_latitude(value: f64) -> Result<(), ModelError> {
    if !value.is_finite() || !(-90.0..=90.0).contains(&value) {
        return Err(ModelError::validation("latitude must be between -90 and 90"));
    }
    Ok(())
}

pub fn validate_longitude(value: f64) -> Result<(), ModelError> {
    if !value.is_finite() || !(-180.0..=180.0).contains(&value) {
        return Err(ModelError::validation("longitude must be between -180 and 180"));
    }
    Ok(())
}

/// Normalizes an optional text field: blank strings become `None`.
pub fn optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_names() {
        assert!(require_non_empty("name", "   ").is_err());
        assert!(require_non_empty("name", "La Picanteria").is_ok());
    }

    #[test]
    fn email_needs_both_parts() {
        assert!(validate_email("email", "owner@example.com").is_ok());
        assert!(validate_email("email", "owner.example.com").is_err());
        assert!(validate_email("email", "@example.com").is_err());
        assert!(validate_email("email", "owner@").is_err());
    }

    #[test]
    fn coordinates_are_bounded() {
        assert!(validate_latitude(-2.1894).is_ok());
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(90.5).is_err());
        assert!(validate_latitude(f64::NAN).is_err());
        assert!(validate_longitude(-79.8891).is_ok());
        assert!(validate_longitude(-180.1).is_err());
    }

    #[test]
    fn optional_drops_blank_values() {
        assert_eq!(optional(Some("  ".into())), None);
        assert_eq!(optional(Some(" 0991234567 ".into())), Some("0991234567".into()));
        assert_eq!(optional(None), None);
    }
}
