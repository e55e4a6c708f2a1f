use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::errors::LoginError;
use crate::domain::account::errors::PasswordPolicyError;

pub use auth::TokenPair;

/// Registered account as persisted by the credential store.
///
/// `password_hash` is a PHC string; the plaintext never reaches storage.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub login: Login,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Login value type
///
/// Natural key of an account: 3-64 characters, alphanumeric plus `_`, `-`,
/// `.` and `@` so e-mail addresses work as logins.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Login(String);

impl Login {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 64;

    /// Create a new valid login.
    ///
    /// # Errors
    /// * `TooShort` - Login shorter than 3 characters
    /// * `TooLong` - Login longer than 64 characters
    /// * `InvalidCharacters` - Contains characters outside the allowed set
    pub fn new(login: String) -> Result<Self, LoginError> {
        let login = Self::with_valid_length(login)?;
        let login = Self::with_valid_chars(login)?;
        Ok(Self(login))
    }

    fn with_valid_length(login: String) -> Result<String, LoginError> {
        let length = login.chars().count();
        if length < Self::MIN_LENGTH {
            Err(LoginError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(LoginError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(login)
        }
    }

    fn with_valid_chars(login: String) -> Result<String, LoginError> {
        if login
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '@'))
        {
            Ok(login)
        } else {
            Err(LoginError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at registration.
pub struct NewPassword(String);

impl NewPassword {
    const MIN_LENGTH: usize = 8;

    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword(***)")
    }
}

/// Command to register a new account with validated fields
#[derive(Debug)]
pub struct RegisterCommand {
    pub login: Login,
    pub password: NewPassword,
}

impl RegisterCommand {
    pub fn new(login: Login, password: NewPassword) -> Self {
        Self { login, password }
    }
}

/// Raw login attempt.
///
/// Left unvalidated on purpose: a malformed login must fail exactly like an
/// unknown one.
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"***")
            .finish()
    }
}

/// Caller identity established from a valid access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub login: String,
}
