use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::TokenClaims;
use super::errors::JwtError;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type so access and refresh payloads share one
/// signing key. Always uses HS256 (HMAC with SHA-256).
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a JWT token.
    ///
    /// Signing is deterministic: identical claims and key always yield the
    /// same compact token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode a JWT token, verifying its signature and structure only.
    ///
    /// Registered time claims are not checked here; see [`JwtHandler::decode_at`].
    ///
    /// # Errors
    /// * `InvalidSignature` - Token was not signed with this handler's key
    /// * `DecodingFailed` - Token is malformed or claims do not match `T`
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.leeway = 0;

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::DecodingFailed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Decode a token of kind `T::KIND` and check its expiration against `now`.
    ///
    /// Checks run in order: signature and structure, kind tag, expiration.
    /// A forged or mistyped token is therefore never reported as merely expired.
    ///
    /// # Arguments
    /// * `token` - JWT token string to decode
    /// * `now` - Current instant (Unix seconds)
    ///
    /// # Errors
    /// * `InvalidSignature` / `DecodingFailed` - as for [`JwtHandler::decode`]
    /// * `UnexpectedTokenKind` - Token is tagged with another kind
    /// * `TokenExpired` - Everything else checks out but `now >= exp`
    pub fn decode_at<T>(&self, token: &str, now: i64) -> Result<T, JwtError>
    where
        T: DeserializeOwned + TokenClaims,
    {
        let claims: T = self.decode(token)?;

        if claims.token_type() != T::KIND {
            return Err(JwtError::UnexpectedTokenKind {
                expected: T::KIND,
                actual: claims.token_type(),
            });
        }

        match claims.expires_at() {
            Some(exp) if now >= exp => Err(JwtError::TokenExpired),
            _ => Ok(claims),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::claims::AccessTokenClaims;
    use crate::jwt::claims::RefreshTokenClaims;
    use crate::jwt::claims::TokenKind;

    const SECRET: &[u8] = b"super_secret_hs256";

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET);
        let claims = RefreshTokenClaims::new("user@email.com", "key");

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert_eq!(token.split('.').count(), 3);

        let decoded: RefreshTokenClaims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let handler = JwtHandler::new(SECRET);
        let claims = AccessTokenClaims::new("existing_email@email.com", 1655690571);

        let first = handler.encode(&claims).unwrap();
        let second = JwtHandler::new(SECRET).encode(&claims).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.decode::<RefreshTokenClaims>("invalid.token.here");
        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1
            .encode(&RefreshTokenClaims::new("user@email.com", "key"))
            .expect("Failed to encode token");

        let result = handler2.decode::<RefreshTokenClaims>(&token);
        assert_eq!(result, Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_decode_does_not_check_expiration() {
        let handler = JwtHandler::new(SECRET);
        let claims = AccessTokenClaims::new("user@email.com", 1);
        let token = handler.encode(&claims).unwrap();

        assert_eq!(handler.decode::<AccessTokenClaims>(&token), Ok(claims));
    }

    #[test]
    fn test_decode_at_expiration_boundary() {
        let handler = JwtHandler::new(SECRET);
        let token = handler
            .encode(&AccessTokenClaims::new("user@email.com", 2000))
            .unwrap();

        assert!(handler.decode_at::<AccessTokenClaims>(&token, 1999).is_ok());
        assert_eq!(
            handler.decode_at::<AccessTokenClaims>(&token, 2000),
            Err(JwtError::TokenExpired)
        );
        assert_eq!(
            handler.decode_at::<AccessTokenClaims>(&token, 2001),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_decode_at_checks_signature_before_expiration() {
        let token = JwtHandler::new(b"another_key")
            .encode(&AccessTokenClaims::new("user@email.com", 10))
            .unwrap();

        let result = JwtHandler::new(SECRET).decode_at::<AccessTokenClaims>(&token, 5000);
        assert_eq!(result, Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_decode_at_rejects_other_kind() {
        let handler = JwtHandler::new(SECRET);
        let mut claims = AccessTokenClaims::new("user@email.com", 10);
        claims.token_type = TokenKind::Refresh;
        let token = handler.encode(&claims).unwrap();

        // Kind mismatch wins over expiration
        let result = handler.decode_at::<AccessTokenClaims>(&token, 5000);
        assert_eq!(
            result,
            Err(JwtError::UnexpectedTokenKind {
                expected: TokenKind::Access,
                actual: TokenKind::Refresh,
            })
        );
    }

    #[test]
    fn test_decode_at_without_expiration_never_expires() {
        let handler = JwtHandler::new(SECRET);
        let token = handler
            .encode(&RefreshTokenClaims::new("user@email.com", "key"))
            .unwrap();

        assert!(handler
            .decode_at::<RefreshTokenClaims>(&token, i64::MAX)
            .is_ok());
    }
}
