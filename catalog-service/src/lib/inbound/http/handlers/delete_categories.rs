use axum::extract::State;
use axum::http::StatusCode;

use super::get_categories::parse_category_ids;
use super::ApiError;
use super::ApiJson;
use crate::inbound::http::router::AppState;

/// Delete every category named by a JSON array of ids.
///
/// Ids that match nothing are ignored.
pub async fn delete_categories(
    State(state): State<AppState>,
    ApiJson(ids): ApiJson<Vec<String>>,
) -> Result<StatusCode, ApiError> {
    let ids = parse_category_ids(&ids)?;

    state
        .category_service
        .delete_categories(&ids)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
