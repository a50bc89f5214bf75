use serde::Deserialize;
use serde::Serialize;

/// Kind tag carried in the `token_type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Common view over the claims of every token kind.
pub trait TokenClaims {
    /// Kind a token must be tagged with to decode as `Self`.
    const KIND: TokenKind;

    /// Kind tag actually carried by the token.
    fn token_type(&self) -> TokenKind;

    /// Expiration time (Unix seconds), if the token expires at all.
    fn expires_at(&self) -> Option<i64>;
}

/// Payload of a short-lived access token.
///
/// Serialized as `{"token_type":"access","email":...,"exp":...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessTokenClaims {
    pub token_type: TokenKind,

    /// Subject email, exactly as supplied at issuance
    pub email: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessTokenClaims {
    /// Create access claims for a subject expiring at `exp`.
    pub fn new(email: impl ToString, exp: i64) -> Self {
        Self {
            token_type: TokenKind::Access,
            email: email.to_string(),
            exp,
        }
    }

    /// Check if token is expired.
    ///
    /// The expiration instant itself already counts as expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

impl TokenClaims for AccessTokenClaims {
    const KIND: TokenKind = TokenKind::Access;

    fn token_type(&self) -> TokenKind {
        self.token_type
    }

    fn expires_at(&self) -> Option<i64> {
        Some(self.exp)
    }
}

/// Payload of a refresh token.
///
/// Refresh tokens carry no `exp`: they stay usable until the custom key
/// they are bound to changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshTokenClaims {
    pub token_type: TokenKind,

    /// Subject email, exactly as supplied at issuance
    pub email: String,

    /// Opaque secondary binding factor
    pub custom_key: String,
}

impl RefreshTokenClaims {
    /// Create refresh claims bound to `custom_key`.
    pub fn new(email: impl ToString, custom_key: impl ToString) -> Self {
        Self {
            token_type: TokenKind::Refresh,
            email: email.to_string(),
            custom_key: custom_key.to_string(),
        }
    }
}

impl TokenClaims for RefreshTokenClaims {
    const KIND: TokenKind = TokenKind::Refresh;

    fn token_type(&self) -> TokenKind {
        self.token_type
    }

    fn expires_at(&self) -> Option<i64> {
        None
    }
}
