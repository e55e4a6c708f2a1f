use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use crate::domain::account::models::TokenPair;
use crate::inbound::http::router::AppState;

#[derive(Deserialize)]
pub struct RefreshRequest {
    refresh_token: String,
}

pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RefreshRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    state
        .account_service
        .refresh(&body.refresh_token)
        .await
        .map_err(ApiError::from)
        .map(Json)
}
