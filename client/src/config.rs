//! Configuration management for the client.

use reqwest::Url;

/// Base URL used during development.
pub const DEVELOPMENT_URL: &str = "http://localhost:8000";

/// Base URL of the hosted API.
pub const PRODUCTION_URL: &str = "https://api-cadastro-7.onrender.com";

/// Which deployment the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DeploymentMode {
    #[default]
    Development,
    Production,
}

impl DeploymentMode {
    /// The base URL for this deployment.
    pub fn base_url(self) -> &'static str {
        match self {
            DeploymentMode::Development => DEVELOPMENT_URL,
            DeploymentMode::Production => PRODUCTION_URL,
        }
    }
}

/// API client configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without the `/api/usuarios/` path
    pub base_url: Url,
}

impl ApiConfig {
    /// Configuration for an explicit base URL.
    ///
    /// The path gets a trailing slash so that joining `api/usuarios/` keeps
    /// any prefix the deployment is mounted under.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let mut base_url =
            Url::parse(base_url).map_err(|_| ConfigError::InvalidBaseUrl(base_url.to_string()))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(base_url.scheme().to_string()));
        }
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { base_url })
    }

    /// Configuration for a deployment mode.
    pub fn for_mode(mode: DeploymentMode) -> Result<Self, ConfigError> {
        Self::new(mode.base_url())
    }

    /// Resolve the configuration from startup arguments.
    ///
    /// An explicit base URL wins over the deployment mode.
    pub fn resolve(mode: DeploymentMode, base_url: Option<&str>) -> Result<Self, ConfigError> {
        match base_url {
            Some(url) => Self::new(url),
            None => Self::for_mode(mode),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}
