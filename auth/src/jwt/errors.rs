use thiserror::Error;

use super::claims::TokenKind;

/// Error type for JWT operations.
///
/// `TokenExpired` is only produced once the signature has verified, so callers
/// can tell an expired token apart from every other failure mode.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Expected a {expected:?} token, got a {actual:?} token")]
    UnexpectedTokenKind {
        expected: TokenKind,
        actual: TokenKind,
    },
}

