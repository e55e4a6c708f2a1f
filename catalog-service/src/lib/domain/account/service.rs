use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AuthenticatedUser;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::Login;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::StoredCredentials;
use crate::domain::account::models::TokenPair;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::ports::CredentialRepository;

/// Domain service for registration, login, refresh and request
/// authentication.
///
/// Token roles are not stored anywhere: each entry point checks the `type`
/// claim of the token it is handed.
pub struct AccountService<CR>
where
    CR: CredentialRepository,
{
    repository: Arc<CR>,
    authenticator: Arc<Authenticator>,
}

impl<CR> AccountService<CR>
where
    CR: CredentialRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential persistence implementation
    /// * `authenticator` - Password hashing and token signing, holding the secret
    pub fn new(repository: Arc<CR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<CR> AccountServicePort for AccountService<CR>
where
    CR: CredentialRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<StoredCredentials, AccountError> {
        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())
            .map_err(|e| AccountError::Password(e.to_string()))?;

        let credentials = StoredCredentials {
            login: command.login,
            password_hash,
            created_at: Utc::now(),
        };

        let created = self.repository.insert(credentials).await?;
        tracing::info!(login = %created.login, "Account registered");

        Ok(created)
    }

    async fn login(&self, credentials: Credentials) -> Result<TokenPair, AccountError> {
        let login =
            Login::new(credentials.login).map_err(|_| AccountError::InvalidCredentials)?;

        let Some(stored) = self.repository.find_by_login(&login).await? else {
            let rejection = self.authenticator.reject_unknown_login(&credentials.password);
            return Err(rejection.into());
        };

        self.authenticator
            .verify_password(&credentials.password, &stored.password_hash)?;

        let pair = self.authenticator.issue_token_pair(stored.login.as_str())?;
        tracing::info!(login = %stored.login, "Session opened");

        Ok(pair)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AccountError> {
        let claims = self.authenticator.validate_refresh_token(refresh_token)?;

        // The presented refresh token stays valid until its own expiry.
        let pair = self.authenticator.issue_token_pair(&claims.sub)?;
        tracing::debug!(login = %claims.sub, "Session refreshed");

        Ok(pair)
    }

    fn authenticate(&self, access_token: &str) -> Result<AuthenticatedUser, AccountError> {
        let claims = self.authenticator.validate_access_token(access_token)?;

        Ok(AuthenticatedUser { login: claims.sub })
    }
}
