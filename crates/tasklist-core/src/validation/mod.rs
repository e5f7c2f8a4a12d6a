//! Input validation for client-supplied fields.
//!
//! Title checks run in a fixed order (required, length, whitespace) and
//! short-circuit on the first failure, so callers always get the most
//! specific error for the earliest broken rule.

pub const MAX_TITLE_LENGTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Title must be less than 100 characters")]
    TitleTooLong,
    #[error("Title cannot be only whitespace")]
    TitleWhitespace,
    #[error("Invalid email format")]
    InvalidEmail,
}

/// Validate a todo title before it reaches the store.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TitleTooLong);
    }
    if title.trim().is_empty() {
        return Err(ValidationError::TitleWhitespace);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_title_is_required() {
        assert_eq!(validate_title(""), Err(ValidationError::TitleRequired));
    }

    #[test]
    fn test_title_over_limit() {
        let title = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert_eq!(validate_title(&title), Err(ValidationError::TitleTooLong));
    }

    #[test]
    fn test_title_at_limit_is_accepted() {
        let title = "x".repeat(MAX_TITLE_LENGTH);
        assert_eq!(validate_title(&title), Ok(()));
    }

    #[test]
    fn test_whitespace_only_title() {
        assert_eq!(
            validate_title("   \t  "),
            Err(ValidationError::TitleWhitespace)
        );
    }

    /// Length is checked before the whitespace rule, so an oversized run of
    /// spaces reports TooLong, not Whitespace.
    #[test]
    fn test_check_order_short_circuits() {
        let title = " ".repeat(MAX_TITLE_LENGTH + 50);
        assert_eq!(validate_title(&title), Err(ValidationError::TitleTooLong));
    }

    #[test]
    fn test_valid_title() {
        assert_eq!(validate_title("Buy milk"), Ok(()));
    }

    #[test]
    fn test_email_requires_at_sign() {
        assert_eq!(
            validate_email("not-an-email"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(validate_email("user@example.com"), Ok(()));
    }
}
