//! kadoc-server
//!
//! The Kadoc HTTP API: snippets and articles over JSON, backed by an
//! in-memory store. The router is exposed here so integration tests can
//! drive it in-process.

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

use axum::http::{header, Method};
use axum::middleware as axum_mw;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};

use kadoc_core::api_paths::{self, ARTICLES, SNIPPETS};

use error::ApiError;
use state::AppState;

/// Build the full application router, mounted under `/api`.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    let api = Router::new()
        .route(&api_paths::health_route(), get(routes::health::health_check))
        .route(
            &api_paths::collection(SNIPPETS),
            get(routes::snippets::list_snippets).post(routes::snippets::create_snippet),
        )
        .route(
            &api_paths::item_route(SNIPPETS),
            get(routes::snippets::get_snippet).put(routes::snippets::update_snippet),
        )
        .route(
            &api_paths::snippet_history_route(),
            get(routes::snippets::snippet_history),
        )
        .route(
            &api_paths::collection(ARTICLES),
            get(routes::articles::list_articles).post(routes::articles::create_article),
        )
        .route(
            &api_paths::item_route(ARTICLES),
            get(routes::articles::get_article).put(routes::articles::update_article),
        );

    Router::new()
        .nest(api_paths::API_PREFIX, api)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(axum_mw::from_fn(middleware::request_log::log_request))
        .layer(cors)
        .with_state(state)
}

fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "handler panicked".to_string());
    ApiError::Internal(detail).into_response()
}
