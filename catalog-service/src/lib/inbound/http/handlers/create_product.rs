use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::resources::product_links;
use super::resources::ProductData;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::account::models::AuthenticatedUser;
use crate::domain::category::models::CategoryId;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::inbound::http::router::AppState;

pub async fn create_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<CreateProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    state
        .product_service
        .create_product(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|product| {
            tracing::debug!(login = %user.login, product_id = %product.id, "Created by");
            let links = product_links(&state.base_url, &product.id);
            ApiSuccess::with_meta(StatusCode::CREATED, product.into(), links)
        })
}

/// HTTP request body for creating a product (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    price: Decimal,
    active: Option<bool>,
    #[serde(default)]
    category_ids: Vec<String>,
}

impl CreateProductRequest {
    fn try_into_command(self) -> Result<CreateProductCommand, ProductError> {
        let category_ids = parse_category_ids(&self.category_ids)?;
        CreateProductCommand::new(
            self.name,
            self.description,
            self.price,
            self.active,
            category_ids,
        )
    }
}

pub(super) fn parse_category_ids(ids: &[String]) -> Result<Vec<CategoryId>, ProductError> {
    ids.iter()
        .map(|id| CategoryId::from_string(id).map_err(ProductError::from))
        .collect()
}
