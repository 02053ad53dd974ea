//! Report creation and sharing routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use bytes::Bytes;
use closeout_core::checklist::ChecklistItem;
use closeout_core::report::ReportBuilder;
use closeout_shared::AppError;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use crate::routes::{error_response, is_valid_name};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/create-report", post(create_report))
        .route("/share-report", post(share_report))
}

/// Request body for report creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    /// Submission folder name.
    pub folder_name: Option<String>,
    /// Name of the employee closing the branch.
    pub employee_name: Option<String>,
    /// Submitted checklist state, one section per task.
    pub sections: Option<Vec<ChecklistItem>>,
}

/// Request body for re-sharing an existing report.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareReportRequest {
    /// Submission folder name.
    pub folder_name: Option<String>,
}

/// POST `/create-report`
/// Render the closing report, upload it, and answer with a public link.
async fn create_report(
    State(state): State<AppState>,
    Json(payload): Json<CreateReportRequest>,
) -> impl IntoResponse {
    let (Some(folder_name), Some(employee_name), Some(sections)) =
        (payload.folder_name, payload.employee_name, payload.sections)
    else {
        return error_response(&AppError::validation("Missing required fields")).into_response();
    };
    if !is_valid_name(&folder_name) {
        return error_response(&AppError::validation("Invalid folderName")).into_response();
    }

    let token = match state.tokens.access_token().await {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "failed to obtain access token");
            return error_response(&e.into()).into_response();
        }
    };

    let html = ReportBuilder::new(state.store.clone())
        .build(&token, &folder_name, &employee_name, &sections)
        .await;

    let report_path = state.store.config().report_path(&folder_name);
    if let Err(e) = state
        .store
        .upload(&token, &report_path, Bytes::from(html))
        .await
    {
        error!(path = %report_path, error = %e, "failed to upload report");
        return error_response(&e.into()).into_response();
    }

    match state.store.create_shared_link(&token, &report_path).await {
        Ok(link) => {
            info!(
                folder = %folder_name,
                employee = %employee_name,
                sections = sections.len(),
                "report created"
            );
            (StatusCode::OK, Json(json!({ "link": link }))).into_response()
        }
        Err(e) => {
            error!(path = %report_path, error = %e, "failed to create share link");
            error_response(&e.into()).into_response()
        }
    }
}

/// POST `/share-report`
/// Create a fresh public link for a previously uploaded report.
async fn share_report(
    State(state): State<AppState>,
    Json(payload): Json<ShareReportRequest>,
) -> impl IntoResponse {
    let Some(folder_name) = payload.folder_name else {
        return error_response(&AppError::validation("Missing folderName")).into_response();
    };
    if !is_valid_name(&folder_name) {
        return error_response(&AppError::validation("Invalid folderName")).into_response();
    }

    let token = match state.tokens.access_token().await {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "failed to obtain access token");
            return error_response(&e.into()).into_response();
        }
    };

    let report_path = state.store.config().report_path(&folder_name);
    match state.store.create_shared_link(&token, &report_path).await {
        Ok(link) => {
            info!(folder = %folder_name, "report shared");
            (StatusCode::OK, Json(json!({ "link": link }))).into_response()
        }
        Err(e) => {
            error!(path = %report_path, error = %e, "failed to create share link");
            error_response(&e.into()).into_response()
        }
    }
}
