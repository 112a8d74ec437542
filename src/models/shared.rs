use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// Validate a required free-text field (non-empty after trimming, bounded).
pub fn validate_text(value: &str, name: &str, max: usize) -> Result<(), AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }
    if trimmed.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{name} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Validate a URL-safe slug: lowercase alphanumerics and hyphens only.
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() || slug.len() > 256 {
        return Err(AppError::Validation("Slug must be 1-256 characters".into()));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::Validation(
            "Slug may only contain lowercase letters, digits and hyphens".into(),
        ));
    }
    Ok(())
}

/// Minimal email shape check. Addresses are otherwise taken as given.
pub fn validate_email(email: &str, name: &str) -> Result<(), AppError> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') || trimmed.len() > 320 {
        return Err(AppError::Validation(format!(
            "{name} must be a valid email address"
        )));
    }
    Ok(())
}

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_rejects_uppercase_and_spaces() {
        assert!(validate_slug("ako-sa-pripravit").is_ok());
        assert!(validate_slug("Ako-Sa").is_err());
        assert!(validate_slug("two words").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn email_requires_an_at_sign() {
        assert!(validate_email("jan@example.com", "email").is_ok());
        assert!(validate_email("not-an-address", "email").is_err());
        assert!(validate_email("  ", "email").is_err());
    }

    #[test]
    fn text_is_bounded() {
        assert!(validate_text("hello", "name", 10).is_ok());
        assert!(validate_text("   ", "name", 10).is_err());
        assert!(validate_text("abcdefghijk", "name", 10).is_err());
    }
}
