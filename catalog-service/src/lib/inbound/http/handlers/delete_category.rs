use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::CategoryId;
use crate::inbound::http::router::AppState;

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let category_id = CategoryId::from_string(&id).map_err(CategoryError::from)?;

    state
        .category_service
        .delete_category(&category_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
