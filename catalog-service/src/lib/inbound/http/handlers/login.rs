use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::TokenPair;
use crate::inbound::http::router::AppState;

/// HTTP request body for login (raw JSON)
#[derive(Deserialize)]
pub struct LoginRequest {
    login: String,
    password: String,
}

/// Exchange credentials for an access/refresh pair.
///
/// The pair is returned bare, outside the `data` envelope.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let credentials = Credentials {
        login: body.login,
        password: body.password,
    };

    state
        .account_service
        .login(credentials)
        .await
        .map_err(ApiError::from)
        .map(Json)
}
