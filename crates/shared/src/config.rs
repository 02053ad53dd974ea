//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage provider configuration.
    pub dropbox: DropboxConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Storage provider configuration.
///
/// The three secrets are required; they are injected into the token provider
/// at construction and never read from the environment ambiently.
#[derive(Debug, Clone, Deserialize)]
pub struct DropboxConfig {
    /// OAuth2 app key.
    pub app_key: String,
    /// OAuth2 app secret.
    pub app_secret: String,
    /// Long-lived OAuth2 refresh token.
    pub refresh_token: String,
    /// Root folder all submissions live under.
    #[serde(default = "default_root_folder")]
    pub root_folder: String,
}

fn default_root_folder() -> String {
    "/forms".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CLOSEOUT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
