use crate::api::{error_response, AppState};
use crate::catalog::store::MapFilter;
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
pub struct MapParams {
    pub year_min: Option<i64>,
    pub year_max: Option<i64>,
    pub author: Option<String>,
    pub translator: Option<String>,
    /// Exact marker address, required for the drill-down listing.
    pub address: Option<String>,
}

fn map_filter(params: &MapParams) -> MapFilter {
    MapFilter {
        year_range: match (params.year_min, params.year_max) {
            (None, None) => None,
            (low, high) => Some((low.unwrap_or(1800), high.unwrap_or(2024))),
        },
        author: params.author.clone(),
        translator: params.translator.clone(),
    }
}

pub async fn list_sites(
    State(state): State<AppState>,
    Query(params): Query<MapParams>,
) -> impl IntoResponse {
    match state.catalog.publication_sites(&map_filter(&params)) {
        Ok(sites) => (
            StatusCode::OK,
            Json(json!({ "total": sites.len(), "sites": sites })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn books_at_site(
    State(state): State<AppState>,
    Query(params): Query<MapParams>,
) -> impl IntoResponse {
    let Some(address) = params.address.as_deref().filter(|a| !a.is_empty()) else {
        return error_response(DomainError::Validation(
            "'address' is required".to_string(),
        ));
    };

    match state.catalog.books_at_site(address, &map_filter(&params)) {
        Ok(books) => (
            StatusCode::OK,
            Json(json!({ "total": books.len(), "books": books })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
