use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use super::hateoas::LinksMeta;
use super::hateoas::PaginationMeta;
use crate::domain::account::errors::AccountError;
use crate::domain::category::errors::CategoryError;
use crate::domain::product::errors::ProductError;

pub mod create_category;
pub mod create_product;
pub mod delete_categories;
pub mod delete_category;
pub mod delete_product;
pub mod delete_products;
pub mod get_categories;
pub mod get_category;
pub mod get_product;
pub mod list_categories;
pub mod list_category_products;
pub mod list_products;
pub mod login;
pub mod refresh;
pub mod register;
pub mod resources;
pub mod update_category;
pub mod update_product;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(data, None)))
    }

    pub fn with_meta(status: StatusCode, data: T, meta: impl Into<ResponseMeta>) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(data, Some(meta.into()))))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    NotAcceptable(String),
    UnsupportedMediaType(String),
    Timeout(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR")
            }
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::NotAcceptable(_) => (StatusCode::NOT_ACCEPTABLE, "NOT_ACCEPTABLE"),
            ApiError::UnsupportedMediaType(_) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
            ),
            ApiError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        let message = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                "Internal server error".to_string()
            }
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::NotAcceptable(msg)
            | ApiError::UnsupportedMediaType(msg)
            | ApiError::Timeout(msg) => msg,
        };

        (status, Json(ApiErrorBody { code, message })).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidLogin(_) | AccountError::InvalidPassword(_) => {
                ApiError::BadRequest(err.to_string())
            }
            AccountError::LoginAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            AccountError::InvalidToken { ref reason } => {
                tracing::debug!(reason = %reason, "Token rejected");
                ApiError::Unauthorized(err.to_string())
            }
            AccountError::InvalidCredentials
            | AccountError::ExpectedAccessToken
            | AccountError::ExpectedRefreshToken => ApiError::Unauthorized(err.to_string()),
            AccountError::Password(_)
            | AccountError::TokenSigning(_)
            | AccountError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::InvalidId(_)
            | CategoryError::NameRequired
            | CategoryError::NameTooLong { .. }
            | CategoryError::DescriptionRequired => ApiError::BadRequest(err.to_string()),
            CategoryError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CategoryError::NameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            CategoryError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::InvalidId(_)
            | ProductError::InvalidCategoryId(_)
            | ProductError::NameRequired
            | ProductError::NameTooLong { .. }
            | ProductError::DescriptionRequired
            | ProductError::NegativePrice
            | ProductError::PriceTooPrecise
            | ProductError::PriceTooLarge
            | ProductError::CategoryRequired
            | ProductError::CategoryNotFound(_) => ApiError::BadRequest(err.to_string()),
            ProductError::NotFound(_) | ProductError::ParentCategoryNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ProductError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::UnsupportedMediaType("Content-Type must be application/json".to_string())
            }
            other => {
                tracing::debug!(error = %other.body_text(), "Rejected request body");
                ApiError::BadRequest("Invalid JSON format".to_string())
            }
        }
    }
}

/// JSON body extractor whose rejections use the API error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Decode a PATCH body, refusing fields outside `allowed`.
///
/// # Errors
/// * `BadRequest` - Unknown fields (all named in the message) or mistyped values
pub fn decode_patch<T: DeserializeOwned>(
    body: Map<String, Value>,
    allowed: &[&str],
) -> Result<T, ApiError> {
    let unknown: Vec<&str> = body
        .keys()
        .map(String::as_str)
        .filter(|key| !allowed.contains(key))
        .collect();
    if !unknown.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "Unknown fields: {}",
            unknown.join(", ")
        )));
    }

    serde_json::from_value(Value::Object(body))
        .map_err(|e| ApiError::BadRequest(format!("Invalid field value: {}", e)))
}

/// Fallback for routes that do not exist.
pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("Resource not found".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    data: T,
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    meta: Option<ResponseMeta>,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(data: T, meta: Option<ResponseMeta>) -> Self {
        Self { data, meta }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseMeta {
    Links(LinksMeta),
    Pagination(PaginationMeta),
}

impl From<LinksMeta> for ResponseMeta {
    fn from(meta: LinksMeta) -> Self {
        ResponseMeta::Links(meta)
    }
}

impl From<PaginationMeta> for ResponseMeta {
    fn from(meta: PaginationMeta) -> Self {
        ResponseMeta::Pagination(meta)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub code: &'static str,
    pub message: String,
}
