//! Page access credentials

use crate::error::AppError;
use std::fmt;

/// Reserved argument key carrying a per-call access token override. Also the
/// environment variable the static token is read from.
pub const ACCESS_TOKEN_KEY: &str = "FACEBOOK_PAGE_ACCESS_TOKEN";

/// Access token plus the optional page the server is scoped to
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub page_id: Option<String>,
}

impl Credential {
    pub fn new(access_token: impl Into<String>, page_id: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            page_id,
        }
    }

    /// Check the token shape before any client is built with it
    pub fn validate(&self) -> Result<(), AppError> {
        if self.access_token.is_empty() {
            return Err(AppError::InvalidCredential("token is empty".to_string()));
        }
        if self
            .access_token
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(AppError::InvalidCredential(
                "token must not contain whitespace or control characters".to_string(),
            ));
        }
        Ok(())
    }
}

// Tokens never end up in logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("page_id", &self.page_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_plain_token() {
        let cred = Credential::new("EAAGm0PX4ZCpsBA", Some("123".to_string()));
        assert!(cred.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_malformed_tokens() {
        assert!(matches!(
            Credential::new("", None).validate(),
            Err(AppError::InvalidCredential(_))
        ));
        assert!(matches!(
            Credential::new("abc def", None).validate(),
            Err(AppError::InvalidCredential(_))
        ));
        assert!(matches!(
            Credential::new("abc\n", None).validate(),
            Err(AppError::InvalidCredential(_))
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let cred = Credential::new("secret-token", None);
        let printed = format!("{:?}", cred);
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("redacted"));
    }
}
