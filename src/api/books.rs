use crate::api::{error_response, AppState};
use crate::catalog::reshape::{labeled_original_edition, labeled_translation};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

/// Side-by-side metadata for one record: the translation as catalogued,
/// next to what is known about the original edition.
pub async fn get_book(
    State(state): State<AppState>,
    Path(mmsid): Path<String>,
) -> impl IntoResponse {
    let (translation, edition) = match state.catalog.get_book(&mmsid) {
        Ok(pair) => pair,
        Err(e) => return error_response(e),
    };

    let translation_view =
        match labeled_translation(&translation, &state.config.urn_resolver_base) {
            Ok(view) => view,
            Err(e) => return error_response(e),
        };

    let original_view = match edition.as_ref().map(labeled_original_edition).transpose() {
        Ok(view) => view,
        Err(e) => return error_response(e),
    };

    (
        StatusCode::OK,
        Json(json!({
            "mmsid": mmsid,
            "translation": translation_view,
            "original": original_view,
        })),
    )
        .into_response()
}
