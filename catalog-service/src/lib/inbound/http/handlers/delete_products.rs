use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiJson;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::ProductId;
use crate::inbound::http::router::AppState;

pub async fn delete_products(
    State(state): State<AppState>,
    ApiJson(ids): ApiJson<Vec<String>>,
) -> Result<StatusCode, ApiError> {
    let ids = ids
        .iter()
        .map(|id| ProductId::from_string(id).map_err(ProductError::from))
        .collect::<Result<Vec<_>, _>>()?;

    state
        .product_service
        .delete_products(&ids)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
