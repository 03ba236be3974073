//! Field checks shared by record validators.

use steeple_core::error::{CoreError, CoreResult};

/// ## Errors
/// Returns `ValidationError` if the value is empty after trimming.
pub fn require(field: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}

/// ## Errors
/// Returns `ValidationError` if the value is empty or not shaped like an address.
pub fn require_email(field: &str, value: &str) -> CoreResult<()> {
    require(field, value)?;
    check_email(field, value)
}

/// ## Errors
/// Returns `ValidationError` if a present, non-blank value is not shaped like an address.
pub fn optional_email(field: &str, value: Option<&str>) -> CoreResult<()> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => check_email(field, v),
        _ => Ok(()),
    }
}

fn check_email(field: &str, value: &str) -> CoreResult<()> {
    let value = value.trim();
    let valid = value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'))
        && !value.contains(char::is_whitespace);

    if valid {
        Ok(())
    } else {
        Err(CoreError::ValidationError(format!(
            "{field} must be a valid email address"
        )))
    }
}

/// Returns the trimmed value when it carries any text.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_whitespace() {
        assert!(require("title", "   ").is_err());
        assert!(require("title", "Easter").is_ok());
    }

    #[test]
    fn test_email_shapes() {
        assert!(require_email("email", "grace@example.org").is_ok());
        assert!(require_email("email", "grace@localhost").is_err());
        assert!(require_email("email", "@example.org").is_err());
        assert!(require_email("email", "grace smith@example.org").is_err());
        assert!(require_email("email", "").is_err());
    }

    #[test]
    fn test_optional_email_skips_blank() {
        assert!(optional_email("email", None).is_ok());
        assert!(optional_email("email", Some("  ")).is_ok());
        assert!(optional_email("email", Some("nope")).is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  hi ")), Some("hi"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
