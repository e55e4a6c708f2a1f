use axum::extract::Query;
use axum::extract::State;

use super::resources::listing;
use super::resources::ListQuery;
use super::resources::ProductData;
use super::resources::Resource;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<ApiSuccess<Vec<Resource<ProductData>>>, ApiError> {
    let (filter, request) = query.into_parts()?;

    let page = state.product_service.list_products(filter, request).await?;

    Ok(listing(
        &state.base_url,
        "/products",
        filter,
        request,
        page,
        Resource::product,
    ))
}
