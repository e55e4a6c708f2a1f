use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use super::decode_patch;
use super::resources::category_links;
use super::resources::CategoryData;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::CategoryId;
use crate::domain::category::models::UpdateCategoryCommand;
use crate::inbound::http::router::AppState;

const UPDATABLE_FIELDS: &[&str] = &["name", "description", "active"];

/// HTTP request body for updating a category (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl UpdateCategoryRequest {
    fn try_into_command(self) -> Result<UpdateCategoryCommand, CategoryError> {
        UpdateCategoryCommand::new(self.name, self.description, self.active)
    }
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<ApiSuccess<CategoryData>, ApiError> {
    let category_id = CategoryId::from_string(&id).map_err(CategoryError::from)?;
    let request: UpdateCategoryRequest = decode_patch(body, UPDATABLE_FIELDS)?;
    let command = request.try_into_command()?;

    state
        .category_service
        .update_category(&category_id, command)
        .await
        .map_err(ApiError::from)
        .map(|category| {
            let links = category_links(&state.base_url, &category.id);
            ApiSuccess::with_meta(StatusCode::OK, category.into(), links)
        })
}
