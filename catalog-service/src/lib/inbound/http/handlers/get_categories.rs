use axum::extract::State;

use super::resources::CategoryData;
use super::resources::Resource;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::CategoryId;
use crate::inbound::http::router::AppState;

/// Fetch the categories named by a JSON array of ids.
///
/// Unknown ids are left out of the result.
pub async fn get_categories(
    State(state): State<AppState>,
    ApiJson(ids): ApiJson<Vec<String>>,
) -> Result<ApiSuccess<Vec<Resource<CategoryData>>>, ApiError> {
    let ids = parse_category_ids(&ids)?;

    let categories = state.category_service.get_categories(&ids).await?;

    Ok(ApiSuccess::new(
        axum::http::StatusCode::OK,
        categories
            .into_iter()
            .map(|category| Resource::category(&state.base_url, category))
            .collect(),
    ))
}

pub(super) fn parse_category_ids(ids: &[String]) -> Result<Vec<CategoryId>, CategoryError> {
    ids.iter()
        .map(|id| CategoryId::from_string(id).map_err(CategoryError::from))
        .collect()
}
