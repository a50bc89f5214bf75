use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;

use crate::custom_key::CustomKey;
use crate::errors::AuthError;
use crate::jwt::AccessTokenClaims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::RefreshTokenClaims;
use crate::password::PasswordHasher;
use crate::ports::StoredUser;
use crate::ports::UserLookup;
use crate::status::TokenStatus;

/// Access and refresh tokens issued by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication service combining credential verification and the token
/// lifecycle.
///
/// Holds only immutable state, so one instance is shared across request
/// tasks behind an `Arc` without locking. The signing key is consumed at
/// construction and never handed back out.
pub struct AuthService<L>
where
    L: UserLookup,
{
    lookup: Arc<L>,
    jwt_handler: JwtHandler,
    password_hasher: PasswordHasher,
    access_token_ttl: Duration,
}

impl<L> AuthService<L>
where
    L: UserLookup,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `lookup` - Credential store implementation
    /// * `signing_key` - Symmetric secret for HS256 signing
    /// * `access_token_ttl` - Lifetime of access tokens issued by `login` and `refresh`
    pub fn new(lookup: Arc<L>, signing_key: &[u8], access_token_ttl: Duration) -> Self {
        Self {
            lookup,
            jwt_handler: JwtHandler::new(signing_key),
            password_hasher: PasswordHasher::new(),
            access_token_ttl,
        }
    }

    /// Replace the password hasher, e.g. with a minimum-cost one in tests.
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Hash a password for storage.
    ///
    /// Runs on the blocking pool.
    ///
    /// # Errors
    /// * `Password` - Hashing operation failed
    /// * `Internal` - Blocking task could not be joined
    pub async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let hasher = self.password_hasher.clone();
        let password = password.to_string();

        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))??;

        Ok(hash)
    }

    /// Check an email/password pair against the credential store.
    ///
    /// An unknown email and a wrong password both yield `Ok(false)`; callers
    /// cannot tell the two apart.
    ///
    /// # Errors
    /// * `Lookup` - Credential store could not be queried
    /// * `Internal` - Blocking task could not be joined
    pub async fn validate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<bool, AuthError> {
        Ok(self.authenticate(email, password).await?.is_some())
    }

    /// Generate a signed access token for `email` expiring at `expiration`.
    ///
    /// # Arguments
    /// * `email` - Subject email
    /// * `expiration` - Absolute expiration instant (Unix seconds)
    ///
    /// # Errors
    /// * `Signing` - Claims could not be signed
    pub fn generate_access_token(
        &self,
        email: &str,
        expiration: i64,
    ) -> Result<String, AuthError> {
        self.jwt_handler
            .encode(&AccessTokenClaims::new(email, expiration))
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to sign access token");
                AuthError::Signing(e)
            })
    }

    /// Generate a signed refresh token for `email` bound to `custom_key`.
    ///
    /// # Errors
    /// * `Signing` - Claims could not be signed
    pub fn generate_refresh_token(
        &self,
        email: &str,
        custom_key: &str,
    ) -> Result<String, AuthError> {
        self.jwt_handler
            .encode(&RefreshTokenClaims::new(email, custom_key))
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to sign refresh token");
                AuthError::Signing(e)
            })
    }

    /// Classify an access token against the current time.
    pub fn validate_access_token(&self, token: &str) -> TokenStatus {
        self.validate_access_token_at(token, Utc::now().timestamp())
    }

    /// Classify an access token against `now` (Unix seconds).
    pub fn validate_access_token_at(&self, token: &str, now: i64) -> TokenStatus {
        match self.verify_access_token_at(token, now) {
            Ok(_) => TokenStatus::Valid,
            Err(status) => status,
        }
    }

    /// Verify an access token against the current time, returning its claims.
    pub fn verify_access_token(&self, token: &str) -> Result<AccessTokenClaims, TokenStatus> {
        self.verify_access_token_at(token, Utc::now().timestamp())
    }

    /// Verify an access token against `now`, returning its claims.
    ///
    /// # Errors
    /// * `TokenStatus::Expired` - Signature verifies but `now >= exp`
    /// * `TokenStatus::Tampered` - Any other failure
    pub fn verify_access_token_at(
        &self,
        token: &str,
        now: i64,
    ) -> Result<AccessTokenClaims, TokenStatus> {
        self.jwt_handler
            .decode_at::<AccessTokenClaims>(token, now)
            .map_err(|e| match e {
                JwtError::TokenExpired => {
                    tracing::info!("Access token expired");
                    TokenStatus::Expired
                }
                other => {
                    tracing::warn!(error = %other, "Access token rejected");
                    TokenStatus::Tampered
                }
            })
    }

    /// Check that a refresh token was signed by this service and is bound to
    /// `expected_custom_key`.
    pub fn validate_refresh_token(&self, token: &str, expected_custom_key: &str) -> bool {
        match self.decode_refresh_token(token) {
            Some(claims) if claims.custom_key == expected_custom_key => true,
            Some(claims) => {
                tracing::warn!(email = %claims.email, "Refresh token custom key mismatch");
                false
            }
            None => false,
        }
    }

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// # Returns
    /// `None` when the credentials are rejected
    ///
    /// # Errors
    /// * `Lookup` - Credential store could not be queried
    /// * `Signing` - Token generation failed
    /// * `Internal` - Expiration falls outside the representable time range
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<TokenPair>, AuthError> {
        let Some(user) = self.authenticate(email, password).await? else {
            return Ok(None);
        };

        let access_token = self.generate_access_token(email, self.access_token_expiration()?)?;
        let refresh_token =
            self.generate_refresh_token(email, CustomKey::for_user(&user).as_str())?;

        tracing::info!(email = %email, "Issued token pair");

        Ok(Some(TokenPair {
            access_token,
            refresh_token,
        }))
    }

    /// Exchange a refresh token for a fresh access token.
    ///
    /// The expected custom key is derived from the subject's current stored
    /// record, so a refresh token outlives neither its user nor their password.
    ///
    /// # Returns
    /// `None` when the token is invalid, its subject is gone, or its key is stale
    ///
    /// # Errors
    /// * `Lookup` - Credential store could not be queried
    /// * `Signing` - Token generation failed
    /// * `Internal` - Expiration falls outside the representable time range
    pub async fn refresh(&self, refresh_token: &str) -> Result<Option<String>, AuthError> {
        let Some(claims) = self.decode_refresh_token(refresh_token) else {
            return Ok(None);
        };

        let Some(user) = self.lookup.get_user_by_email(&claims.email).await? else {
            tracing::warn!(email = %claims.email, "Refresh token subject no longer exists");
            return Ok(None);
        };

        if !self.validate_refresh_token(refresh_token, CustomKey::for_user(&user).as_str()) {
            return Ok(None);
        }

        self.generate_access_token(&claims.email, self.access_token_expiration()?)
            .map(Some)
    }

    /// Custom key refresh tokens for `user` are bound to.
    pub fn custom_key_for(&self, user: &StoredUser) -> CustomKey {
        CustomKey::for_user(user)
    }

    fn access_token_expiration(&self) -> Result<i64, AuthError> {
        Utc::now()
            .checked_add_signed(self.access_token_ttl)
            .map(|expiration| expiration.timestamp())
            .ok_or_else(|| {
                tracing::error!(
                    ttl = %self.access_token_ttl,
                    "Access token expiration out of range"
                );
                AuthError::Internal("Access token expiration out of range".to_string())
            })
    }

    fn decode_refresh_token(&self, token: &str) -> Option<RefreshTokenClaims> {
        // Refresh tokens carry no expiration, so `now` has no effect here
        self.jwt_handler
            .decode_at::<RefreshTokenClaims>(token, Utc::now().timestamp())
            .map_err(|e| tracing::warn!(error = %e, "Refresh token rejected"))
            .ok()
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<StoredUser>, AuthError> {
        let user = self.lookup.get_user_by_email(email).await.map_err(|e| {
            tracing::error!(error = %e, "Credential lookup failed");
            AuthError::from(e)
        })?;

        let Some(user) = user else {
            tracing::debug!("Login rejected");
            return Ok(None);
        };

        let hasher = self.password_hasher.clone();
        let password = password.to_string();
        let password_hash = user.password_hash.clone();

        let is_valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        if !is_valid {
            tracing::debug!("Login rejected");
            return Ok(None);
        }

        Ok(Some(user))
    }
}
