use sha2::Digest;
use sha2::Sha256;

use crate::ports::StoredUser;

/// Secondary binding factor embedded in refresh tokens.
///
/// Derived from the user's current password hash. A password change stores a
/// freshly salted hash, which changes the key and invalidates every refresh
/// token issued before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomKey(String);

impl CustomKey {
    /// Derive the key as the hex-encoded SHA-256 of a stored password hash.
    pub fn derive(password_hash: &str) -> Self {
        Self(hex::encode(Sha256::digest(password_hash.as_bytes())))
    }

    pub fn for_user(user: &StoredUser) -> Self {
        Self::derive(&user.password_hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
