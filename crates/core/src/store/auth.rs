//! OAuth2 token provider.

use serde::Deserialize;
use tracing::error;

use super::config::StoreConfig;
use super::error::StoreError;

/// Exchanges the stored refresh token for a short-lived bearer token.
///
/// Tokens are fetched fresh per request group and never cached; each handler
/// obtains its own token and threads it through the store calls it makes.
pub struct TokenProvider {
    http: reqwest::Client,
    config: StoreConfig,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl TokenProvider {
    /// Create a new token provider.
    #[must_use]
    pub fn new(http: reqwest::Client, config: StoreConfig) -> Self {
        Self { http, config }
    }

    /// Fetch a fresh bearer token via the refresh-token grant.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Auth` if the OAuth endpoint answers with a
    /// non-success status or an unparsable body, `StoreError::Network` if the
    /// request never completes.
    pub async fn access_token(&self) -> Result<String, StoreError> {
        let credentials = &self.config.credentials;
        let response = self
            .http
            .post(format!("{}/oauth2/token", self.config.api_base))
            .basic_auth(&credentials.app_key, Some(&credentials.app_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", credentials.refresh_token.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!(status, body = %body, "failed to refresh access token");
            return Err(StoreError::auth(format!("status {status}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::auth(e.to_string()))?;

        Ok(token.access_token)
    }
}
