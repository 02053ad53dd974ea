//! API route definitions.

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use closeout_shared::AppError;
use serde_json::json;

use crate::AppState;

pub mod checklist;
pub mod health;
pub mod reports;
pub mod uploads;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(checklist::routes())
        .merge(uploads::routes())
        .merge(reports::routes())
}

/// Shape an error into the JSON body every endpoint answers with.
pub(crate) fn error_response(err: &AppError) -> (StatusCode, Json<serde_json::Value>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
}

/// A submission folder or file name as accepted on the wire.
///
/// Names become single path segments under the submission root; separators
/// and empty strings are rejected up front with a 400.
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\')
}
