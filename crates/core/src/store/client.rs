//! Storage provider REST client.
//!
//! A thin wrapper over the provider's file API. Every operation is a single
//! request/response with no retry logic; the caller obtains a bearer token
//! beforehand and there is no refresh-on-401 handling here.

use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;

use super::config::StoreConfig;
use super::error::StoreError;

/// Metadata for an existing file or folder entry.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryMetadata {
    /// Entry kind as reported by the provider (`file` or `folder`).
    #[serde(rename = ".tag", default)]
    pub tag: String,
    /// Entry name.
    pub name: String,
    /// Display path, when the provider includes one.
    #[serde(default)]
    pub path_display: Option<String>,
}

/// Thin client for the provider's file and sharing endpoints.
pub struct StoreClient {
    http: reqwest::Client,
    config: StoreConfig,
}

impl StoreClient {
    /// Create a new store client.
    #[must_use]
    pub fn new(http: reqwest::Client, config: StoreConfig) -> Self {
        Self { http, config }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Look up metadata for a path.
    ///
    /// The provider signals "not found" with a 409 status; that outcome is
    /// `Ok(None)` here, never an error.
    pub async fn get_metadata(
        &self,
        token: &str,
        path: &str,
    ) -> Result<Option<EntryMetadata>, StoreError> {
        let response = self
            .http
            .post(format!("{}/2/files/get_metadata", self.config.api_base))
            .bearer_auth(token)
            .json(&json!({ "path": path }))
            .send()
            .await?;

        match response.status().as_u16() {
            200 => {
                let metadata = response
                    .json()
                    .await
                    .map_err(|e| StoreError::api(200, e.to_string()))?;
                Ok(Some(metadata))
            }
            409 => Ok(None),
            status => Err(Self::api_error(status, response).await),
        }
    }

    /// Create a folder at `path`.
    pub async fn create_folder(&self, token: &str, path: &str) -> Result<(), StoreError> {
        let response = self
            .http
            .post(format!(
                "{}/2/files/create_folder_v2",
                self.config.api_base
            ))
            .bearer_auth(token)
            .json(&json!({ "path": path, "autorename": false }))
            .send()
            .await?;

        Self::expect_success(response).await
    }

    /// Move an entry from `from` to `to`.
    pub async fn move_entry(&self, token: &str, from: &str, to: &str) -> Result<(), StoreError> {
        let response = self
            .http
            .post(format!("{}/2/files/move_v2", self.config.api_base))
            .bearer_auth(token)
            .json(&json!({
                "from_path": from,
                "to_path": to,
                "autorename": false,
            }))
            .send()
            .await?;

        Self::expect_success(response).await
    }

    /// Upload `bytes` to `path`, overwriting any existing file.
    pub async fn upload(&self, token: &str, path: &str, bytes: Bytes) -> Result<(), StoreError> {
        let arg = json!({
            "path": path,
            "mode": "overwrite",
            "autorename": false,
            "mute": false,
        });

        let response = self
            .http
            .post(format!("{}/2/files/upload", self.config.content_base))
            .bearer_auth(token)
            .header("Dropbox-API-Arg", arg.to_string())
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await?;

        Self::expect_success(response).await
    }

    /// Download the file at `path`.
    pub async fn download(&self, token: &str, path: &str) -> Result<Bytes, StoreError> {
        let response = self
            .http
            .post(format!("{}/2/files/download", self.config.content_base))
            .bearer_auth(token)
            .header("Dropbox-API-Arg", json!({ "path": path }).to_string())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(Self::api_error(status, response).await);
        }

        Ok(response.bytes().await?)
    }

    /// Create a public share link for `path`.
    ///
    /// The provider hands back a preview URL; its `?dl=0` parameter is
    /// rewritten to `?raw=1` so the link serves the document itself.
    pub async fn create_shared_link(&self, token: &str, path: &str) -> Result<String, StoreError> {
        #[derive(Deserialize)]
        struct SharedLinkResponse {
            url: String,
        }

        let response = self
            .http
            .post(format!(
                "{}/2/sharing/create_shared_link_with_settings",
                self.config.api_base
            ))
            .bearer_auth(token)
            .json(&json!({
                "path": path,
                "settings": { "requested_visibility": "public" },
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(Self::api_error(status, response).await);
        }

        let link: SharedLinkResponse = response
            .json()
            .await
            .map_err(|e| StoreError::api(200, e.to_string()))?;

        Ok(raw_content_url(&link.url))
    }

    async fn expect_success(response: reqwest::Response) -> Result<(), StoreError> {
        if response.status().is_success() {
            return Ok(());
        }
        let status = response.status().as_u16();
        Err(Self::api_error(status, response).await)
    }

    async fn api_error(status: u16, response: reqwest::Response) -> StoreError {
        let message = response.text().await.unwrap_or_default();
        StoreError::api(status, message)
    }
}

/// Rewrite a provider preview URL into a raw-content URL.
#[must_use]
pub fn raw_content_url(url: &str) -> String {
    url.replace("?dl=0", "?raw=1")
}
