//! Input validation and sanitization utilities
//!
//! This module provides utilities for validating user input and
//! configuration values before they reach the network layer.

use crate::error::CliError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Loose email shape check: something before and after an '@', with a dot
/// in the domain part.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !email.chars().any(char::is_whitespace)
}

/// Validate an email address
pub fn validate_email(email: &str) -> crate::Result<()> {
    if email.is_empty() {
        return Err(CliError::InvalidArguments("Email cannot be empty".to_string()).into());
    }
    if !is_valid_email(email) {
        return Err(CliError::InvalidArguments(format!(
            "'{}' is not a valid email address",
            email
        ))
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_valid_urls() {
        assert!(validate_url("http://localhost:8081/a/api").is_ok());
        assert!(validate_url("https://gym.example.com/a/api").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_invalid_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("localhost:8081").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("admin@gym.test"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
        assert!(!is_valid_email("admin"));
        assert!(!is_valid_email("admin@"));
        assert!(!is_valid_email("@gym.test"));
        assert!(!is_valid_email("admin@nodot"));
        assert!(!is_valid_email("spaced name@gym.test"));
    }

    #[test]
    fn test_validate_email_messages() {
        assert!(validate_email("admin@gym.test").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("nope").is_err());
    }
}
