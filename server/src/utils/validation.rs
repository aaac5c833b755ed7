//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! CRUD handlers before anything reaches the storage layer.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, category, customer, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Short identifiers: phone, SKU, slug, contact
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that a quantity is strictly positive.
pub fn validate_positive_quantity(value: i64, field: &str) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::validation(format!(
            "{field} must be a positive integer"
        )));
    }
    Ok(())
}

/// Validate that a price is finite and not negative.
pub fn validate_price(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_required_text() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("ok", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn rejects_non_positive_quantity() {
        assert!(validate_positive_quantity(0, "quantity").is_err());
        assert!(validate_positive_quantity(-3, "quantity").is_err());
        assert!(validate_positive_quantity(1, "quantity").is_ok());
    }

    #[test]
    fn rejects_bad_prices() {
        assert!(validate_price(-0.01, "selling_price").is_err());
        assert!(validate_price(f64::NAN, "selling_price").is_err());
        assert!(validate_price(19.99, "selling_price").is_ok());
    }
}
