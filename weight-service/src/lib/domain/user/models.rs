use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordError;

/// User profile entity.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a new user from validated parts, stamped with a fresh id.
    pub fn new(name: String, email: EmailAddress, password_hash: String) -> Self {
        Self {
            id: UserId::new(),
            name,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Stored trimmed and lowercased, so at most one account exists per address
/// regardless of how it was typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated, normalized email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: &str) -> Result<Self, EmailError> {
        let normalized = Self::normalize(email);

        email_address::EmailAddress::from_str(&normalized)
            .map(|_| EmailAddress(normalized))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Canonical form used for storage and lookups.
    pub fn normalize(email: &str) -> String {
        email.trim().to_lowercase()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Part before the `@`.
    pub fn local_part(&self) -> &str {
        self.0.rsplit_once('@').map_or(self.0.as_str(), |(local, _)| local)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plain-text password accepted for registration
///
/// Only its length is checked; it is hashed before it reaches the store.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    /// Create a new password that meets the minimum length.
    ///
    /// # Errors
    /// * `TooShort` - Password shorter than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordError> {
        let actual = password.chars().count();
        if actual < Self::MIN_LENGTH {
            return Err(PasswordError::TooShort {
                min: Self::MIN_LENGTH,
                actual,
            });
        }

        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserCommand {
    pub name: String,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterUserCommand {
    pub fn new(name: String, email: EmailAddress, password: Password) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let email = EmailAddress::new("  Existing_Email@Email.COM ").unwrap();
        assert_eq!(email.as_str(), "existing_email@email.com");
        assert_eq!(email.local_part(), "existing_email");
    }

    #[test]
    fn test_invalid_email() {
        assert!(matches!(
            EmailAddress::new("not-an-email"),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_password_minimum_length() {
        assert_eq!(
            Password::new("abcde".to_string()),
            Err(PasswordError::TooShort { min: 6, actual: 5 })
        );
        assert_eq!(Password::new("abcdef".to_string()).unwrap().as_str(), "abcdef");
    }

    #[test]
    fn test_password_length_counts_characters() {
        assert!(Password::new("pässw".to_string()).is_err());
        assert!(Password::new("pässwö".to_string()).is_ok());
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("correct_password1234".to_string()).unwrap();
        assert!(!format!("{password:?}").contains("correct"));
    }
}
