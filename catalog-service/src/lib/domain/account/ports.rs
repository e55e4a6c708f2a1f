use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AuthenticatedUser;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::Login;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::StoredCredentials;
use crate::domain::account::models::TokenPair;

/// Port for registration and session operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Errors
    /// * `LoginAlreadyExists` - Login is already taken
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<StoredCredentials, AccountError>;

    /// Verify credentials and open a session.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown login, malformed login or wrong password
    /// * `TokenSigning` - Token generation failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, credentials: Credentials) -> Result<TokenPair, AccountError>;

    /// Exchange a refresh token for a brand-new token pair.
    ///
    /// # Errors
    /// * `InvalidToken` - Token failed verification
    /// * `ExpectedRefreshToken` - Token is an access token
    /// * `TokenSigning` - Token generation failed
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AccountError>;

    /// Check the bearer token of a request to a protected route.
    ///
    /// Never touches storage.
    ///
    /// # Errors
    /// * `InvalidToken` - Token failed verification
    /// * `ExpectedAccessToken` - Token is a refresh token
    fn authenticate(&self, access_token: &str) -> Result<AuthenticatedUser, AccountError>;
}

/// Persistence operations for credentials.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Retrieve stored credentials by login.
    ///
    /// # Returns
    /// Optional credentials (None if the login is unknown)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_login(&self, login: &Login) -> Result<Option<StoredCredentials>, AccountError>;

    /// Persist new credentials.
    ///
    /// # Errors
    /// * `LoginAlreadyExists` - Login is already taken
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, credentials: StoredCredentials)
        -> Result<StoredCredentials, AccountError>;
}
