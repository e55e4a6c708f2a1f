use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryId;
use crate::domain::pagination::paginate;
use crate::domain::pagination::ListFilter;
use crate::domain::pagination::Page;
use crate::domain::pagination::PageRequest;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::hateoas::pagination_links;
use crate::inbound::http::hateoas::resource_links;
use crate::inbound::http::hateoas::LinksMeta;
use crate::inbound::http::hateoas::PaginationMeta;

pub const CATEGORIES: &str = "categories";
pub const PRODUCTS: &str = "products";

/// Raw listing query string (`page`, `limit`, `active`).
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    page: Option<String>,
    limit: Option<String>,
    active: Option<String>,
}

impl ListQuery {
    /// Resolve the query into a filter and a page window.
    ///
    /// Non-numeric `page`/`limit` fall back to their defaults.
    ///
    /// # Errors
    /// * `BadRequest` - `active` is not one of `0`, `1`, `true`, `false`
    pub fn into_parts(self) -> Result<(ListFilter, PageRequest), ApiError> {
        let page = number_or(self.page, PageRequest::DEFAULT_PAGE);
        let limit = number_or(self.limit, PageRequest::DEFAULT_LIMIT);

        let active = match self.active.as_deref().map(str::trim) {
            None | Some("") => None,
            Some("1") | Some("true") => Some(true),
            Some("0") | Some("false") => Some(false),
            Some(other) => {
                return Err(ApiError::BadRequest(format!(
                    "Invalid value for active: {}",
                    other
                )))
            }
        };

        Ok((ListFilter { active }, PageRequest::new(page, limit)))
    }
}

fn number_or(value: Option<String>, default: i64) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

/// Category fields as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryData {
    pub id: String,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Category> for CategoryData {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name,
            description: category.description,
            active: category.active,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// Product fields as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductData {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub category_ids: Vec<String>,
}

impl From<Product> for ProductData {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price: product.price,
            active: product.active,
            created_at: product.created_at,
            updated_at: product.updated_at,
            category_ids: product
                .category_ids
                .iter()
                .map(CategoryId::to_string)
                .collect(),
        }
    }
}

/// Listing item: the resource fields plus its own links.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource<T> {
    #[serde(flatten)]
    pub data: T,
    #[serde(rename = "_meta")]
    pub meta: LinksMeta,
}

impl Resource<CategoryData> {
    pub fn category(base_url: &str, category: Category) -> Self {
        Self {
            meta: category_links(base_url, &category.id),
            data: category.into(),
        }
    }
}

impl Resource<ProductData> {
    pub fn product(base_url: &str, product: Product) -> Self {
        Self {
            meta: product_links(base_url, &product.id),
            data: product.into(),
        }
    }
}

pub fn category_links(base_url: &str, id: &CategoryId) -> LinksMeta {
    LinksMeta {
        links: resource_links(base_url, CATEGORIES, id),
    }
}

pub fn product_links(base_url: &str, id: &ProductId) -> LinksMeta {
    LinksMeta {
        links: resource_links(base_url, PRODUCTS, id),
    }
}

/// Wrap one listing page with its pagination meta.
///
/// `path` is the listing route the navigation links point back to.
pub fn listing<T, R>(
    base_url: &str,
    path: &str,
    filter: ListFilter,
    request: PageRequest,
    page: Page<T>,
    to_resource: impl Fn(&str, T) -> R,
) -> ApiSuccess<Vec<R>>
where
    R: Serialize + PartialEq,
{
    let navigation = paginate(page.total_count, request);
    let links = pagination_links(base_url, path, &navigation, &filter);
    let items: Vec<R> = page
        .items
        .into_iter()
        .map(|item| to_resource(base_url, item))
        .collect();
    let meta = PaginationMeta::new(&navigation, items.len(), links);

    ApiSuccess::with_meta(axum::http::StatusCode::OK, items, meta)
}
