use axum::extract::Query;
use axum::extract::State;

use super::resources::listing;
use super::resources::CategoryData;
use super::resources::ListQuery;
use super::resources::Resource;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<ApiSuccess<Vec<Resource<CategoryData>>>, ApiError> {
    let (filter, request) = query.into_parts()?;

    let page = state
        .category_service
        .list_categories(filter, request)
        .await?;

    Ok(listing(
        &state.base_url,
        "/categories",
        filter,
        request,
        page,
        Resource::category,
    ))
}
