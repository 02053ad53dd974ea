//! Photo and folder upload routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use closeout_shared::AppError;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use crate::routes::{error_response, is_valid_name};
use closeout_core::store::resolve_folder;

/// Creates the upload routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/upload", post(upload))
}

/// Request body for the upload endpoint.
///
/// Two modes share one endpoint, distinguished by which fields are present:
/// `folderName` alone creates the submission folder; `folderName` plus
/// `fileName` and `fileData` uploads one photo into it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Submission folder name (typically the closing date).
    pub folder_name: Option<String>,
    /// Photo file name, in file-upload mode.
    pub file_name: Option<String>,
    /// Base64-encoded photo payload, in file-upload mode.
    pub file_data: Option<String>,
}

/// POST `/upload`
/// Create the submission folder, or upload one photo into it.
async fn upload(State(state): State<AppState>, Json(payload): Json<UploadRequest>) -> impl IntoResponse {
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

    match (payload.file_name, payload.file_data) {
        (None, None) => create_submission_folder(&state, &token, &folder_name)
            .await
            .into_response(),
        (Some(file_name), Some(file_data)) => {
            upload_photo(&state, &token, &folder_name, &file_name, &file_data)
                .await
                .into_response()
        }
        _ => error_response(&AppError::validation("Missing fileName or fileData")).into_response(),
    }
}

/// Folder-creation mode: free the folder name (relocating any previous
/// occupant to a version suffix) and create it fresh.
async fn create_submission_folder(
    state: &AppState,
    token: &str,
    folder_name: &str,
) -> impl IntoResponse {
    let base_path = state.store.config().folder_path(folder_name);

    let final_path = match resolve_folder(&state.store, token, &base_path).await {
        Ok(path) => path,
        Err(e) => {
            error!(base_path = %base_path, error = %e, "failed to resolve submission folder");
            return error_response(&e.into()).into_response();
        }
    };

    if let Err(e) = state.store.create_folder(token, &final_path).await {
        error!(path = %final_path, error = %e, "failed to create submission folder");
        return error_response(&e.into()).into_response();
    }

    info!(path = %final_path, "submission folder ready");
    (StatusCode::OK, Json(json!({ "folderPath": final_path }))).into_response()
}

/// File-upload mode: decode the photo and write it into the folder.
async fn upload_photo(
    state: &AppState,
    token: &str,
    folder_name: &str,
    file_name: &str,
    file_data: &str,
) -> impl IntoResponse {
    if !is_valid_name(file_name) {
        return error_response(&AppError::validation("Invalid fileName")).into_response();
    }

    let bytes = match BASE64.decode(file_data) {
        Ok(bytes) => bytes,
        Err(_) => {
            return error_response(&AppError::validation("Invalid fileData")).into_response();
        }
    };

    let path = state.store.config().file_path(folder_name, file_name);
    if let Err(e) = state.store.upload(token, &path, Bytes::from(bytes)).await {
        error!(path = %path, error = %e, "photo upload failed");
        return error_response(&e.into()).into_response();
    }

    info!(path = %path, "photo uploaded");
    (StatusCode::OK, Json(json!({ "message": "File uploaded" }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use closeout_core::store::{Credentials, StoreClient, StoreConfig, TokenProvider};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state(server: &mockito::Server) -> AppState {
        let config = StoreConfig::new(Credentials::new("key", "secret", "refresh"))
            .with_api_base(server.url())
            .with_content_base(server.url());
        let http = reqwest::Client::new();
        AppState {
            store: Arc::new(StoreClient::new(http.clone(), config.clone())),
            tokens: Arc::new(TokenProvider::new(http, config)),
        }
    }

    fn app(state: AppState) -> Router {
        Router::new().merge(routes()).with_state(state)
    }

    fn post_json(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/upload")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn token_mock(server: &mut mockito::Server) -> mockito::Mock {
        server
            .mock("POST", "/oauth2/token")
            .with_status(200)
            .with_body(r#"{"access_token":"sl.test-token"}"#)
            .create_async()
            .await
    }

    async fn metadata_mock(
        server: &mut mockito::Server,
        path: &str,
        exists: bool,
    ) -> mockito::Mock {
        let builder = server
            .mock("POST", "/2/files/get_metadata")
            .match_body(mockito::Matcher::Json(json!({ "path": path })));
        let builder = if exists {
            builder
                .with_status(200)
                .with_body(r#"{".tag":"folder","name":"x"}"#)
        } else {
            builder
                .with_status(409)
                .with_body(r#"{"error_summary":"path/not_found/..."}"#)
        };
        builder.create_async().await
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_missing_folder_name_is_400() {
        let server = mockito::Server::new_async().await;
        let response = app(test_state(&server))
            .oneshot(post_json(json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Missing folderName");
    }

    #[tokio::test]
    async fn test_half_specified_file_is_400() {
        let mut server = mockito::Server::new_async().await;
        token_mock(&mut server).await;

        let response = app(test_state(&server))
            .oneshot(post_json(json!({
                "folderName": "2024-01-01",
                "fileName": "a.jpg",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Missing fileName or fileData");
    }

    #[tokio::test]
    async fn test_invalid_base64_is_400() {
        let mut server = mockito::Server::new_async().await;
        token_mock(&mut server).await;

        let response = app(test_state(&server))
            .oneshot(post_json(json!({
                "folderName": "2024-01-01",
                "fileName": "a.jpg",
                "fileData": "!!! not base64 !!!",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Invalid fileData");
    }

    #[tokio::test]
    async fn test_folder_mode_fresh_path() {
        let mut server = mockito::Server::new_async().await;
        token_mock(&mut server).await;
        metadata_mock(&mut server, "/forms/2024-01-01", false).await;
        let create = server
            .mock("POST", "/2/files/create_folder_v2")
            .match_body(mockito::Matcher::Json(json!({
                "path": "/forms/2024-01-01",
                "autorename": false,
            })))
            .with_status(200)
            .with_body(r#"{"metadata":{"name":"2024-01-01"}}"#)
            .create_async()
            .await;

        let response = app(test_state(&server))
            .oneshot(post_json(json!({ "folderName": "2024-01-01" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["folderPath"], "/forms/2024-01-01");
        create.assert_async().await;
    }

    #[tokio::test]
    async fn test_folder_mode_occupied_path_relocates_occupant() {
        let mut server = mockito::Server::new_async().await;
        token_mock(&mut server).await;
        metadata_mock(&mut server, "/forms/2024-01-01", true).await;
        metadata_mock(&mut server, "/forms/2024-01-01_ver1", false).await;
        let relocate = server
            .mock("POST", "/2/files/move_v2")
            .match_body(mockito::Matcher::Json(json!({
                "from_path": "/forms/2024-01-01",
                "to_path": "/forms/2024-01-01_ver1",
                "autorename": false,
            })))
            .with_status(200)
            .with_body(r#"{"metadata":{"name":"2024-01-01_ver1"}}"#)
            .create_async()
            .await;
        let create = server
            .mock("POST", "/2/files/create_folder_v2")
            .match_body(mockito::Matcher::Json(json!({
                "path": "/forms/2024-01-01",
                "autorename": false,
            })))
            .with_status(200)
            .with_body(r#"{"metadata":{"name":"2024-01-01"}}"#)
            .create_async()
            .await;

        let response = app(test_state(&server))
            .oneshot(post_json(json!({ "folderName": "2024-01-01" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["folderPath"], "/forms/2024-01-01");
        relocate.assert_async().await;
        create.assert_async().await;
    }

    #[tokio::test]
    async fn test_file_mode_uploads_decoded_payload() {
        let mut server = mockito::Server::new_async().await;
        token_mock(&mut server).await;
        let upload = server
            .mock("POST", "/2/files/upload")
            .match_header(
                "dropbox-api-arg",
                mockito::Matcher::Regex(
                    r#""path":"/forms/2024-01-01/item0_image1\.jpg""#.to_string(),
                ),
            )
            .match_body("jpeg-bytes")
            .with_status(200)
            .with_body(r#"{"name":"item0_image1.jpg"}"#)
            .create_async()
            .await;

        let response = app(test_state(&server))
            .oneshot(post_json(json!({
                "folderName": "2024-01-01",
                "fileName": "item0_image1.jpg",
                "fileData": BASE64.encode(b"jpeg-bytes"),
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "File uploaded");
        upload.assert_async().await;
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500() {
        let mut server = mockito::Server::new_async().await;
        token_mock(&mut server).await;
        server
            .mock("POST", "/2/files/get_metadata")
            .with_status(500)
            .with_body("internal")
            .create_async()
            .await;

        let response = app(test_state(&server))
            .oneshot(post_json(json!({ "folderName": "2024-01-01" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "upstream_error");
    }

    #[tokio::test]
    async fn test_non_post_is_405() {
        let server = mockito::Server::new_async().await;
        let response = app(test_state(&server))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/upload")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
