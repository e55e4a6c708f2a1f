use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::resources::category_links;
use super::resources::CategoryData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::CategoryId;
use crate::inbound::http::router::AppState;

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<CategoryData>, ApiError> {
    let category_id = CategoryId::from_string(&id).map_err(CategoryError::from)?;

    state
        .category_service
        .get_category(&category_id)
        .await
        .map_err(ApiError::from)
        .map(|category| {
            let links = category_links(&state.base_url, &category.id);
            ApiSuccess::with_meta(StatusCode::OK, category.into(), links)
        })
}
