pub mod books;
pub mod health;
pub mod map;
pub mod reviews;
pub mod search;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::domain::DomainError;
use crate::services::ReviewService;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub reviews: Arc<ReviewService>,
    pub config: Arc<Config>,
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Corpus search
        .route("/search", get(search::search_corpus))
        .route("/search/columns", get(search::filterable_columns))
        .route("/languages", get(search::available_languages))
        // Per-book metadata
        .route("/books/:mmsid", get(books::get_book))
        // Map
        .route("/map/sites", get(map::list_sites))
        .route("/map/sites/books", get(map::books_at_site))
        // Reviews
        .route("/reviews", get(reviews::find_reviews))
        .with_state(state)
}

/// Map the domain taxonomy onto response codes. External failures are the
/// only retryable class and surface as 502 so the frontend can offer a
/// retry instead of a crash page.
pub(crate) fn error_response(err: DomainError) -> Response {
    let status = match &err {
        DomainError::NotFound => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::External(_) => StatusCode::BAD_GATEWAY,
        DomainError::Configuration(_) | DomainError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(json!({
            "error": err.to_string(),
            "retryable": err.is_retryable(),
        })),
    )
        .into_response()
}
