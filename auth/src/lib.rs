//! Authentication utilities library
//!
//! Provides the session infrastructure used by the catalog service:
//! - Password hashing (Argon2id)
//! - JWT access/refresh token issuance and validation (HS256)
//! - Role enforcement between access and refresh tokens
//!
//! The library knows nothing about where credentials are stored; the
//! service owns the credential store and calls in here for the crypto.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Authenticator, TokenType};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! let pair = auth.issue_token_pair("alice").unwrap();
//! let claims = auth.validate_access_token(&pair.access_token).unwrap();
//! assert_eq!(claims.sub, "alice");
//! assert_eq!(claims.token_type, TokenType::Access);
//!
//! // An access token cannot be used to refresh the session.
//! assert!(auth.validate_refresh_token(&pair.access_token).is_err());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use authenticator::ACCESS_TOKEN_TTL_MINUTES;
pub use authenticator::REFRESH_TOKEN_TTL_DAYS;
pub use authenticator::TOKEN_ISSUER;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenType;
pub use password::PasswordError;
pub use password::PasswordHasher;
