use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;

use super::resources::listing;
use super::resources::ListQuery;
use super::resources::ProductData;
use super::resources::Resource;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::CategoryId;
use crate::inbound::http::router::AppState;

pub async fn list_category_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<ApiSuccess<Vec<Resource<ProductData>>>, ApiError> {
    let category_id = CategoryId::from_string(&id).map_err(CategoryError::from)?;
    let (filter, request) = query.into_parts()?;

    let page = state
        .product_service
        .list_products_by_category(&category_id, filter, request)
        .await?;

    Ok(listing(
        &state.base_url,
        &format!("/categories/{}/products", category_id),
        filter,
        request,
        page,
        Resource::product,
    ))
}
