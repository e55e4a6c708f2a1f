use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::resources::category_links;
use super::resources::CategoryData;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::account::models::AuthenticatedUser;
use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::CreateCategoryCommand;
use crate::inbound::http::router::AppState;

pub async fn create_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<CreateCategoryRequest>,
) -> Result<ApiSuccess<CategoryData>, ApiError> {
    state
        .category_service
        .create_category(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|category| {
            tracing::debug!(login = %user.login, category_id = %category.id, "Created by");
            let links = category_links(&state.base_url, &category.id);
            ApiSuccess::with_meta(StatusCode::CREATED, category.into(), links)
        })
}

/// HTTP request body for creating a category (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    active: Option<bool>,
}

impl CreateCategoryRequest {
    fn try_into_command(self) -> Result<CreateCategoryCommand, CategoryError> {
        CreateCategoryCommand::new(self.name, self.description, self.active)
    }
}
