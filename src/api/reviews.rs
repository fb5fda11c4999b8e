use crate::api::{error_response, AppState};
use crate::domain::DomainError;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct ReviewParams {
    pub author: Option<String>,
    pub title: Option<String>,
    pub publication_year: Option<i64>,
}

/// Candidate newspaper reviews for one book. All three parameters are
/// required; the archive is only consulted once per distinct triple.
pub async fn find_reviews(
    State(state): State<AppState>,
    Query(params): Query<ReviewParams>,
) -> impl IntoResponse {
    let author = params.author.as_deref().map(str::trim).unwrap_or_default();
    let title = params.title.as_deref().map(str::trim).unwrap_or_default();
    let Some(year) = params.publication_year else {
        return error_response(DomainError::Validation(
            "'author', 'title' and 'publication_year' are required".to_string(),
        ));
    };
    if author.is_empty() || title.is_empty() {
        return error_response(DomainError::Validation(
            "'author', 'title' and 'publication_year' are required".to_string(),
        ));
    }

    match state.reviews.find_reviews(author, title, year).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(json!({
                "total": outcome.hits.len(),
                "hits": &outcome.hits,
                "more_results_url": &outcome.more_results_url,
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
