//! Environment based configuration.

use std::env::{self, VarError};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::navigation::Navigator;
use crate::storage::FileTokenStorage;
use crate::ApiClient;

/// Variable holding the API base URL.
pub const API_URL_VAR: &str = "MOVIE_API_URL";
/// Variable holding the token file location.
pub const TOKEN_PATH_VAR: &str = "MOVIE_TOKEN_PATH";
/// Base URL used when [`API_URL_VAR`] is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Settings needed to reach the backend and persist the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the catalog API.
    pub api_url: String,
    /// Where the session token is persisted. `None` uses the per-user data directory.
    pub token_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_path: None,
        }
    }
}

impl ClientConfig {
    /// Loads a `.env` file if there is one, then reads the environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(error) = dotenvy::dotenv() {
            if !error.not_found() {
                tracing::warn!(error = %error, "Ignoring unreadable .env file");
            }
        }

        Self::from_env()
    }

    /// Reads the configuration from the process environment only.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = read_var(API_URL_VAR)?
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token_path = read_var(TOKEN_PATH_VAR)?
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_url,
            token_path,
        })
    }

    /// Builds an [`ApiClient`] persisting its token on disk.
    pub fn into_client(self, navigator: Arc<dyn Navigator>) -> Result<ApiClient, ConfigError> {
        let storage = match self.token_path {
            Some(path) => FileTokenStorage::new(path),
            None => FileTokenStorage::in_data_dir()?,
        };

        let client = ApiClient::builder(&self.api_url)
            .storage(Arc::new(storage))
            .navigator(navigator)
            .build()?;

        Ok(client)
    }
}

fn read_var(name: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(name)),
    }
}
