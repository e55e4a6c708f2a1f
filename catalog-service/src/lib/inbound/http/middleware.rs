use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const JSON: &str = "application/json";

/// Middleware that validates the bearer access token and adds the caller to
/// request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(req.headers())?;

    let user = state.account_service.authenticate(token).map_err(|e| {
        tracing::warn!(error = %e, uri = %req.uri(), "Bearer token rejected");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

fn extract_token_from_header(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )),
    }
}

/// Middleware that only lets JSON in and out.
///
/// * `Accept` must allow `application/json` (406 otherwise)
/// * POST, PUT and PATCH bodies must be `application/json` (415 otherwise)
pub async fn negotiate_media_type(req: Request, next: Next) -> Result<Response, ApiError> {
    if !accepts_json(req.headers()) {
        return Err(ApiError::NotAcceptable(format!(
            "Accept header must allow {}",
            JSON
        )));
    }

    let has_body = matches!(*req.method(), Method::POST | Method::PUT | Method::PATCH);
    if has_body && !is_json_content(req.headers()) {
        return Err(ApiError::UnsupportedMediaType(format!(
            "Content-Type must be {}",
            JSON
        )));
    }

    Ok(next.run(req).await)
}

fn accepts_json(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT) else {
        return true;
    };
    let Ok(accept) = accept.to_str() else {
        return false;
    };
    if accept.trim().is_empty() {
        return true;
    }

    accept
        .split(',')
        .map(media_type)
        .any(|range| {
            range == "*/*" || range == "application/*" || range.eq_ignore_ascii_case(JSON)
        })
}

fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| media_type(value).eq_ignore_ascii_case(JSON))
        .unwrap_or(false)
}

// Media type without parameters, e.g. `application/json; charset=utf-8`
fn media_type(value: &str) -> &str {
    value.split(';').next().unwrap_or_default().trim()
}

/// Middleware that bounds every request by the configured deadline.
///
/// Dropping the handler future cancels whatever store call is in flight.
pub async fn enforce_deadline(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let method = req.method().clone();
    let uri = req.uri().clone();

    tokio::time::timeout(state.request_timeout, next.run(req))
        .await
        .map_err(|_| {
            tracing::warn!(
                method = %method,
                uri = %uri,
                timeout_ms = state.request_timeout.as_millis(),
                "Request deadline exceeded"
            );
            ApiError::Timeout("Request timed out".to_string())
        })
}
