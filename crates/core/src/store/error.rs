//! Storage provider error types.

use thiserror::Error;

/// Storage provider operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The OAuth2 token exchange failed.
    #[error("token refresh failed: {0}")]
    Auth(String),

    /// The provider answered with an unexpected status.
    #[error("provider returned status {status}: {message}")]
    Api {
        /// HTTP status code the provider answered with.
        status: u16,
        /// Provider error body, passed through verbatim.
        message: String,
    },

    /// The request never produced a provider response.
    #[error("provider request failed: {0}")]
    Network(String),

    /// Every candidate version suffix for a folder was already taken.
    #[error("no free version suffix for folder: {path}")]
    VersionExhausted {
        /// Base path whose suffixes were exhausted.
        path: String,
    },
}

impl StoreError {
    /// Create a token exchange error.
    #[must_use]
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a provider status error.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a version exhaustion error.
    #[must_use]
    pub fn version_exhausted(path: impl Into<String>) -> Self {
        Self::VersionExhausted { path: path.into() }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<StoreError> for closeout_shared::AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::VersionExhausted { .. } => Self::internal(err.to_string()),
            other => Self::upstream(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_mapping() {
        use closeout_shared::AppError;

        let upstream: AppError = StoreError::api(500, "boom").into();
        assert_eq!(upstream.error_code(), "upstream_error");

        let exhausted: AppError = StoreError::version_exhausted("/forms/day").into();
        assert_eq!(exhausted.error_code(), "internal_error");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            StoreError::auth("status 400").to_string(),
            "token refresh failed: status 400"
        );
        assert_eq!(
            StoreError::api(500, "path/not_found").to_string(),
            "provider returned status 500: path/not_found"
        );
        assert_eq!(
            StoreError::version_exhausted("/forms/2024-01-01").to_string(),
            "no free version suffix for folder: /forms/2024-01-01"
        );
    }
}
