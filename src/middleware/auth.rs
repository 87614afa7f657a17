use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::error::ApiError;
use crate::state::AppState;

/// Only mutating methods need a token.
pub fn requires_auth(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::DELETE)
}

/// Auth gate decision for one request.
///
/// Reads pass unconditionally. Writes must carry exactly `Bearer <secret>`; the comparison is
/// constant-time over the whole header value.
pub fn is_authorized(method: &Method, authorization: Option<&HeaderValue>, secret: &str) -> bool {
    if !requires_auth(method) {
        return true;
    }

    let Some(value) = authorization else {
        return false;
    };

    let expected = format!("Bearer {}", secret);
    value.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Rejects unauthenticated POST/PUT/DELETE with 401 before routing.
pub async fn write_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let authorization = request.headers().get(header::AUTHORIZATION);

    if !is_authorized(request.method(), authorization, &state.config.secret_key) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Rejected unauthenticated write"
        );
        return ApiError::unauthorized().into_response();
    }

    next.run(request).await
}
