use thiserror::Error;

/// Error for Login validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Login too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Login too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Login contains invalid characters (only alphanumeric, '_', '-', '.' and '@' allowed)")]
    InvalidCharacters,
}

/// Error for password policy failures on registration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Top-level error for registration and session operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Invalid login: {0}")]
    InvalidLogin(#[from] LoginError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Login already exists: {0}")]
    LoginAlreadyExists(String),

    // Unknown login and wrong password share this variant
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken { reason: String },

    #[error("Expected access token")]
    ExpectedAccessToken,

    #[error("Expected refresh token")]
    ExpectedRefreshToken,

    #[error("Password hashing error: {0}")]
    Password(String),

    #[error("Token signing error: {0}")]
    TokenSigning(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<auth::AuthenticationError> for AccountError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
            auth::AuthenticationError::InvalidToken(e) => AccountError::InvalidToken {
                reason: e.to_string(),
            },
            auth::AuthenticationError::ExpectedAccessToken => AccountError::ExpectedAccessToken,
            auth::AuthenticationError::ExpectedRefreshToken => AccountError::ExpectedRefreshToken,
            auth::AuthenticationError::PasswordError(e) => AccountError::Password(e.to_string()),
            auth::AuthenticationError::SigningFailed(e) => {
                AccountError::TokenSigning(e.to_string())
            }
        }
    }
}
