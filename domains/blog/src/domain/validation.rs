//! Validation helpers and constants for blog entities

use scribe_common::{Error, Result};

/// Maximum post title length in characters
pub const MAX_TITLE_LENGTH: usize = 100;

/// GitHub logins are at most 39 characters
pub const MAX_USERNAME_LENGTH: usize = 39;

/// Maximum comment length in characters
pub const MAX_COMMENT_LENGTH: usize = 5000;

fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub fn validate_title(title: &str) -> Result<()> {
    let len = char_len(title.trim());
    if len == 0 || char_len(title) > MAX_TITLE_LENGTH {
        return Err(Error::Validation(format!(
            "Title must be 1-{} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<()> {
    let len = char_len(username);
    if len == 0 || len > MAX_USERNAME_LENGTH {
        return Err(Error::Validation(format!(
            "Username must be 1-{} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_comment_text(text: &str) -> Result<()> {
    if text.trim().is_empty() || char_len(text) > MAX_COMMENT_LENGTH {
        return Err(Error::Validation(format!(
            "Comment must be 1-{} characters",
            MAX_COMMENT_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert!(validate_title("a").is_ok());
        assert!(validate_title(&"a".repeat(100)).is_ok());
        assert!(validate_title(&"é".repeat(100)).is_ok());

        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_username_bounds() {
        assert!(validate_username("a").is_ok());
        assert!(validate_username(&"a".repeat(39)).is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username(&"a".repeat(40)).is_err());
    }

    #[test]
    fn test_comment_text() {
        assert!(validate_comment_text("Nice post").is_ok());
        assert!(validate_comment_text(" \n ").is_err());
        assert!(validate_comment_text(&"a".repeat(5001)).is_err());
    }
}
