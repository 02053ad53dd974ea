//! Storage provider configuration types.

use serde::{Deserialize, Serialize};

/// OAuth2 application credentials for the storage provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// App key (OAuth2 client id).
    pub app_key: String,
    /// App secret (OAuth2 client secret).
    pub app_secret: String,
    /// Long-lived refresh token exchanged for short-lived bearer tokens.
    pub refresh_token: String,
}

impl Credentials {
    /// Create credentials from the three required secrets.
    #[must_use]
    pub fn new(
        app_key: impl Into<String>,
        app_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: app_secret.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Storage provider client configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// OAuth2 credentials.
    pub credentials: Credentials,
    /// Base URL of the provider's RPC endpoints.
    pub api_base: String,
    /// Base URL of the provider's content (upload/download) endpoints.
    pub content_base: String,
    /// Root folder all submissions live under.
    pub root_folder: String,
}

impl StoreConfig {
    /// Default RPC endpoint base.
    pub const DEFAULT_API_BASE: &'static str = "https://api.dropboxapi.com";
    /// Default content endpoint base.
    pub const DEFAULT_CONTENT_BASE: &'static str = "https://content.dropboxapi.com";
    /// Default submission root folder.
    pub const DEFAULT_ROOT_FOLDER: &'static str = "/forms";

    /// Create a new store config with default endpoints.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base: Self::DEFAULT_API_BASE.to_string(),
            content_base: Self::DEFAULT_CONTENT_BASE.to_string(),
            root_folder: Self::DEFAULT_ROOT_FOLDER.to_string(),
        }
    }

    /// Override the RPC endpoint base (tests point this at a mock server).
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Override the content endpoint base.
    #[must_use]
    pub fn with_content_base(mut self, base: impl Into<String>) -> Self {
        self.content_base = base.into();
        self
    }

    /// Override the submission root folder.
    #[must_use]
    pub fn with_root_folder(mut self, root: impl Into<String>) -> Self {
        self.root_folder = root.into();
        self
    }

    /// Remote path of a submission folder: `{root}/{folder_name}`.
    #[must_use]
    pub fn folder_path(&self, folder_name: &str) -> String {
        format!("{}/{folder_name}", self.root_folder)
    }

    /// Remote path of a file inside a submission folder.
    #[must_use]
    pub fn file_path(&self, folder_name: &str, file_name: &str) -> String {
        format!("{}/{folder_name}/{file_name}", self.root_folder)
    }

    /// Remote path of the generated report document for a submission.
    #[must_use]
    pub fn report_path(&self, folder_name: &str) -> String {
        format!(
            "{}/{folder_name}/report_{folder_name}.html",
            self.root_folder
        )
    }

    /// Remote path of the fallback logo shown for photo-less sections.
    #[must_use]
    pub fn logo_path(&self) -> String {
        format!("{}/logo.png", self.root_folder)
    }
}
