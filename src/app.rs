use axum::{
    middleware::from_fn_with_state,
    routing::{get, put},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::handlers::{self, category, project, record};
use crate::middleware::{cors_middleware, panic_response, write_auth_middleware};
use crate::state::AppState;

/// Full HTTP surface.
///
/// Layers run outermost first: tracing, CORS (answers OPTIONS itself), the write auth gate,
/// then panic capture around the routes. Unmatched methods and paths hit `not_found`;
/// HEAD is routed there explicitly since `get` would otherwise answer it.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(collection_routes())
        .merge(record_routes())
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(from_fn_with_state(state.clone(), write_auth_middleware))
        .layer(from_fn_with_state(state.clone(), cors_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn collection_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/categories",
            get(category::list)
                .post(category::create)
                .head(handlers::not_found)
                .fallback(handlers::not_found),
        )
        .route(
            "/api/projects",
            get(project::list)
                .post(project::create)
                .head(handlers::not_found)
                .fallback(handlers::not_found),
        )
}

fn record_routes() -> Router<AppState> {
    Router::new().route(
        "/api/:resource/:id",
        put(record::put)
            .delete(record::delete)
            .fallback(handlers::not_found),
    )
}
