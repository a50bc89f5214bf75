//! Authentication core for the weight tracker.
//!
//! Provides credential verification and the stateless token lifecycle:
//! - Password hashing (Argon2id)
//! - JWT access and refresh tokens (HS256)
//! - Access-token classification into [`TokenStatus`]
//!
//! The service reads users through the [`UserLookup`] port, so any store
//! (or an in-memory fake) can back it.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{AccessTokenClaims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"super_secret_hs256");
//! let token = handler.encode(&AccessTokenClaims::new("user@email.com", 2000)).unwrap();
//! let claims: AccessTokenClaims = handler.decode_at(&token, 1000).unwrap();
//! assert_eq!(claims.email, "user@email.com");
//! assert!(handler.decode_at::<AccessTokenClaims>(&token, 2000).is_err());
//! ```

pub mod custom_key;
pub mod errors;
pub mod jwt;
pub mod password;
pub mod ports;
pub mod service;
pub mod status;

// Re-export commonly used items
pub use custom_key::CustomKey;
pub use errors::AuthError;
pub use jwt::AccessTokenClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::RefreshTokenClaims;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use ports::LookupError;
pub use ports::StoredUser;
pub use ports::UserLookup;
pub use service::AuthService;
pub use service::TokenPair;
pub use status::TokenStatus;
