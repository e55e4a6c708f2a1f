use std::sync::OnceLock;

use chrono::Duration;
use serde::Serialize;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenType;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Issuer stamped into and required on every session token.
pub const TOKEN_ISSUER: &str = "ecomapi";

/// Access token lifetime: 15 minutes.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

/// Refresh token lifetime: 7 days.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-logins";

/// Authentication coordinator combining password verification and JWT
/// session tokens.
///
/// Issues access/refresh pairs and enforces that each token is consumed in
/// its own role. Tokens are never stored server-side; expiry is their only
/// end of life.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
    // Hashed on first use; `None` if hashing failed
    decoy_hash: OnceLock<Option<String>>,
}

/// Freshly issued access + refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken(#[source] JwtError),

    #[error("Expected access token")]
    ExpectedAccessToken,

    #[error("Expected refresh token")]
    ExpectedRefreshToken,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token signing failed: {0}")]
    SigningFailed(#[source] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing, injected from configuration
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret).with_issuer(TOKEN_ISSUER),
            access_ttl: Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
            refresh_ttl: Duration::days(REFRESH_TOKEN_TTL_DAYS),
            decoy_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against the stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be read
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Reject a login that has no stored hash.
    ///
    /// Runs a full verification against a decoy hash first, so an unknown
    /// login costs as much as a wrong password. Always `InvalidCredentials`.
    pub fn reject_unknown_login(&self, password: &str) -> AuthenticationError {
        let decoy = self
            .decoy_hash
            .get_or_init(|| self.password_hasher.hash(DECOY_PASSWORD).ok());
        if let Some(hash) = decoy {
            let _ = self.password_hasher.verify(password, hash);
        }
        AuthenticationError::InvalidCredentials
    }

    /// Issue a new access + refresh pair bound to `subject`.
    ///
    /// # Errors
    /// * `SigningFailed` - Token generation failed
    pub fn issue_token_pair(&self, subject: &str) -> Result<TokenPair, AuthenticationError> {
        let access = Claims::new(subject, TOKEN_ISSUER, TokenType::Access, self.access_ttl);
        let refresh = Claims::new(subject, TOKEN_ISSUER, TokenType::Refresh, self.refresh_ttl);

        Ok(TokenPair {
            access_token: self.generate_token(&access)?,
            refresh_token: self.generate_token(&refresh)?,
        })
    }

    /// Sign arbitrary claims without any role or lifetime policy.
    ///
    /// # Errors
    /// * `SigningFailed` - Token generation failed
    pub fn generate_token<T: Serialize>(&self, claims: &T) -> Result<String, AuthenticationError> {
        self.jwt_handler
            .encode(claims)
            .map_err(AuthenticationError::SigningFailed)
    }

    /// Validate a token presented on a protected route.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, algorithm, issuer or expiry check failed
    /// * `ExpectedAccessToken` - Token is a refresh token
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AuthenticationError> {
        let claims = self.validate_token(token)?;
        if !claims.is_access() {
            return Err(AuthenticationError::ExpectedAccessToken);
        }
        Ok(claims)
    }

    /// Validate a token presented to the refresh flow.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, algorithm, issuer or expiry check failed
    /// * `ExpectedRefreshToken` - Token is an access token
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AuthenticationError> {
        let claims = self.validate_token(token)?;
        if !claims.is_refresh() {
            return Err(AuthenticationError::ExpectedRefreshToken);
        }
        Ok(claims)
    }

    /// Validate and decode a token regardless of its role.
    ///
    /// # Errors
    /// * `InvalidToken` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthenticationError> {
        self.jwt_handler
            .decode(token)
            .map_err(AuthenticationError::InvalidToken)
    }
}
