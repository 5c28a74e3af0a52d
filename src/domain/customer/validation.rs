use std::sync::LazyLock;

use regex::Regex;

use super::errors::ValidationError;

// ============================================================================
// Field Validators
// ============================================================================
//
// Pure checks on raw string input. Every setter on a customer runs the
// matching check before storing, so these are a setter contract rather than
// a one-time construction gate.
//
// ============================================================================

pub const MIN_ADDRESS_LEN: usize = 5;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("static email pattern")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{8,15}$").expect("static phone pattern"));

/// Fails with [`ValidationError::Empty`] when the trimmed value is empty.
pub fn require_non_empty(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    require_non_empty(value, "email")?;
    let trimmed = value.trim();
    if !EMAIL_RE.is_match(trimmed) {
        return Err(ValidationError::InvalidEmail(trimmed.to_string()));
    }
    Ok(())
}

/// Internal spaces are ignored for the shape check ("+56 9 1234 5678" is valid).
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    require_non_empty(value, "phone")?;
    let compact: String = value.trim().chars().filter(|c| *c != ' ').collect();
    if !PHONE_RE.is_match(&compact) {
        return Err(ValidationError::InvalidPhone(value.trim().to_string()));
    }
    Ok(())
}

pub fn validate_address(value: &str) -> Result<(), ValidationError> {
    require_non_empty(value, "address")?;
    let trimmed = value.trim();
    if trimmed.chars().count() < MIN_ADDRESS_LEN {
        return Err(ValidationError::InvalidAddress(trimmed.to_string()));
    }
    Ok(())
}
