use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use super::create_product::parse_category_ids;
use super::decode_patch;
use super::resources::product_links;
use super::resources::ProductData;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;
use crate::inbound::http::router::AppState;

const UPDATABLE_FIELDS: &[&str] = &["name", "description", "price", "active", "category_ids"];

/// HTTP request body for updating a product (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub active: Option<bool>,
    pub category_ids: Option<Vec<String>>,
}

impl UpdateProductRequest {
    fn try_into_command(self) -> Result<UpdateProductCommand, ProductError> {
        let category_ids = self
            .category_ids
            .as_deref()
            .map(parse_category_ids)
            .transpose()?;

        UpdateProductCommand::new(
            self.name,
            self.description,
            self.price,
            self.active,
            category_ids,
        )
    }
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let product_id = ProductId::from_string(&id).map_err(ProductError::from)?;
    let request: UpdateProductRequest = decode_patch(body, UPDATABLE_FIELDS)?;
    let command = request.try_into_command()?;

    state
        .product_service
        .update_product(&product_id, command)
        .await
        .map_err(ApiError::from)
        .map(|product| {
            let links = product_links(&state.base_url, &product.id);
            ApiSuccess::with_meta(StatusCode::OK, product.into(), links)
        })
}
