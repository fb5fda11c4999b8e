use crate::api::{error_response, AppState};
use crate::catalog::predicate::{FilterSpec, FilterValue};
use crate::catalog::reshape::reshape;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, Clone)]
pub struct SearchParams {
    pub author: Option<String>,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub publisher: Option<String>,
    pub translator: Option<String>,
    pub contributor: Option<String>,
    /// Comma-separable target-language codes.
    pub language: Option<String>,
    /// Comma-separable original-language codes.
    pub original_language: Option<String>,
    pub year_min: Option<i64>,
    pub year_max: Option<i64>,
    pub fiction: Option<bool>,
}

/// Build the ordered filter specification from the submitted form fields.
/// Field order is fixed so identical submissions build identical predicates.
fn filter_spec(params: &SearchParams) -> FilterSpec {
    let mut spec = FilterSpec::new();
    if let Some(fiction) = params.fiction {
        spec.push("ddc800", FilterValue::Flag(fiction));
    }
    push_text(&mut spec, "main_author", params.author.as_deref());
    push_text(&mut spec, "title", params.title.as_deref());
    push_text(&mut spec, "original_title", params.original_title.as_deref());
    push_text(&mut spec, "publisher", params.publisher.as_deref());
    push_text(&mut spec, "translators", params.translator.as_deref());
    push_text(&mut spec, "contributors", params.contributor.as_deref());
    push_terms(&mut spec, "language", params.language.as_deref());
    push_terms(&mut spec, "original_language", params.original_language.as_deref());
    if params.year_min.is_some() || params.year_max.is_some() {
        spec.push(
            "publication_year_int",
            FilterValue::Range(
                params.year_min.unwrap_or(1800),
                params.year_max.unwrap_or(2024),
            ),
        );
    }
    spec
}

fn push_text(spec: &mut FilterSpec, column: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        spec.push(column, FilterValue::Text(value.to_string()));
    }
}

fn push_terms(spec: &mut FilterSpec, column: &str, value: Option<&str>) {
    let Some(value) = value else { return };
    let terms: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if !terms.is_empty() {
        spec.push(column, FilterValue::Terms(terms));
    }
}

pub async fn search_corpus(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let spec = filter_spec(&params);

    let records = match state.catalog.search_translations(&spec) {
        Ok(records) => records,
        Err(e) => return error_response(e),
    };

    let table = match reshape(records, &state.config.urn_resolver_base) {
        Ok(table) => table,
        Err(e) => return error_response(e),
    };

    tracing::info!(total = table.rows.len(), "corpus search served");

    (
        StatusCode::OK,
        Json(json!({
            "total": table.rows.len(),
            "columns": table.columns,
            "rows": table.rows,
        })),
    )
        .into_response()
}

pub async fn filterable_columns(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.filterable_columns() {
        Ok(columns) => (StatusCode::OK, Json(json!({ "columns": columns }))).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn available_languages(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.available_languages() {
        Ok(languages) => {
            (StatusCode::OK, Json(json!({ "languages": languages }))).into_response()
        }
        Err(e) => error_response(e),
    }
}
