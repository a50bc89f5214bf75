use thiserror::Error;

use crate::jwt::JwtError;
use crate::password::PasswordError;
use crate::ports::LookupError;

/// Infrastructure failures of the auth service.
///
/// Rejected credentials and bad tokens are not errors: they come back as
/// `false`, `None` or a [`crate::TokenStatus`].
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Credential lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("Token signing failed: {0}")]
    Signing(#[from] JwtError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Internal error: {0}")]
    Internal(String),
}
