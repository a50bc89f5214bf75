use async_trait::async_trait;
use thiserror::Error;

/// Credential record read by the auth service.
///
/// Owned by whatever persistence layer backs users; only the fields
/// authentication needs are carried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub email: String,
    pub password_hash: String,
}

/// Error raised by a credential store that could not answer a lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only user lookup consumed by [`crate::AuthService`].
#[async_trait]
pub trait UserLookup: Send + Sync + 'static {
    /// Retrieve a user's credentials by email address.
    ///
    /// # Arguments
    /// * `email` - Email address, already normalized by the caller
    ///
    /// # Returns
    /// Optional stored user (None if no user has this email)
    ///
    /// # Errors
    /// * `Unavailable` - Store could not be queried
    async fn get_user_by_email(&self, email: &str) -> Result<Option<StoredUser>, LookupError>;
}
