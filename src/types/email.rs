//! Subscriber email addresses.
//!
//! The `EmailAddress` newtype only accepts strings with the minimal
//! `local@domain` shape, so a subscriber record can never hold an obviously
//! malformed address.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A minimally validated email address.
///
/// Validation is deliberately shallow: the trimmed value must be non-empty
/// and contain an `@`. Deliverability is the mail provider's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and wrap an address.
    pub fn parse(value: &str) -> Result<Self, EmailError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if !trimmed.contains('@') {
            return Err(EmailError::MissingAt(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EmailAddress {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Error type for email validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EmailError {
    #[error("email address is empty")]
    Empty,
    #[error("email address has no '@': {0}")]
    MissingAt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        let email = EmailAddress::parse("  dev@example.com ").unwrap();
        assert_eq!(email.as_str(), "dev@example.com");
    }

    #[test]
    fn test_invalid_email() {
        assert!(matches!(EmailAddress::parse(""), Err(EmailError::Empty)));
        assert!(matches!(
            EmailAddress::parse("not-an-email"),
            Err(EmailError::MissingAt(_))
        ));
    }

    #[test]
    fn test_email_deserialize_validates() {
        assert!(serde_json::from_str::<EmailAddress>("\"a@b\"").is_ok());
        assert!(serde_json::from_str::<EmailAddress>("\"nope\"").is_err());
    }
}
