use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Login;
use crate::domain::account::models::NewPassword;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::StoredCredentials;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref credentials| ApiSuccess::new(StatusCode::CREATED, credentials.into()))
}

/// HTTP request body for registering credentials (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    login: String,
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, AccountError> {
        let login = Login::new(self.login)?;
        let password = NewPassword::new(self.password)?;
        Ok(RegisterCommand::new(login, password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub login: String,
    pub created_at: DateTime<Utc>,
}

impl From<&StoredCredentials> for RegisterResponseData {
    fn from(credentials: &StoredCredentials) -> Self {
        Self {
            login: credentials.login.as_str().to_string(),
            created_at: credentials.created_at,
        }
    }
}
