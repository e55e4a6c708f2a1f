use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_category::create_category;
use super::handlers::create_product::create_product;
use super::handlers::delete_categories::delete_categories;
use super::handlers::delete_category::delete_category;
use super::handlers::delete_product::delete_product;
use super::handlers::delete_products::delete_products;
use super::handlers::get_categories::get_categories;
use super::handlers::get_category::get_category;
use super::handlers::get_product::get_product;
use super::handlers::list_categories::list_categories;
use super::handlers::list_category_products::list_category_products;
use super::handlers::list_products::list_products;
use super::handlers::login::login;
use super::handlers::refresh::refresh;
use super::handlers::register::register;
use super::handlers::route_not_found;
use super::handlers::update_category::update_category;
use super::handlers::update_product::update_product;
use super::middleware::authenticate as auth_middleware;
use super::middleware::enforce_deadline;
use super::middleware::negotiate_media_type;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::category::ports::CategoryServicePort;
use crate::domain::product::ports::ProductServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub category_service: Arc<dyn CategoryServicePort>,
    pub product_service: Arc<dyn ProductServicePort>,
    /// Prefix for every hypermedia href; empty for relative links
    pub base_url: Arc<str>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        account_service: Arc<dyn AccountServicePort>,
        category_service: Arc<dyn CategoryServicePort>,
        product_service: Arc<dyn ProductServicePort>,
        base_url: &str,
        request_timeout: Duration,
    ) -> Self {
        Self {
            account_service,
            category_service,
            product_service,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            request_timeout,
        }
    }
}

pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let public_routes = Router::new()
        .route("/users", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/categories", get(list_categories))
        .route("/categories/_get", post(get_categories))
        .route("/categories/:id", get(get_category))
        .route("/categories/:id/products", get(list_category_products))
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product));

    let protected_routes = Router::new()
        .route("/admin/categories", post(create_category))
        .route("/admin/categories/_delete", post(delete_categories))
        .route(
            "/admin/categories/:id",
            patch(update_category).delete(delete_category),
        )
        .route("/admin/products", post(create_product))
        .route("/admin/products/_delete", post(delete_products))
        .route(
            "/admin/products/:id",
            patch(update_product).delete(delete_product),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(cors_layer(allowed_origins))
                .layer(middleware::from_fn(negotiate_media_type))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    enforce_deadline,
                )),
        )
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}
