//! HTTP client for the usuarios REST API.
//!
//! Each operation maps to exactly one HTTP call. Any transport error, non-2xx
//! status or undecodable body is returned as an [`ApiError`]. There are no
//! retries, no timeout overrides and no credentials.
//!
//! # Example
//!
//! ```no_run
//! use cadastro_client::{ApiClient, ApiConfig, DeploymentMode};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ApiConfig::for_mode(DeploymentMode::Development)?;
//! let api = ApiClient::new(&config)?;
//! let usuarios = api.list().await?;
//! # Ok(())
//! # }
//! ```

use cadastro_engine::{NewUsuario, Usuario, UsuarioId};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};

/// Collection path, relative to the base URL.
const USUARIOS_PATH: &str = "api/usuarios/";

/// Client bound to one base URL for the lifetime of the process.
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the configured base URL.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Self::client_builder().build()?;
        Ok(Self::with_client(client, config))
    }

    /// A reqwest builder preset with the headers every request carries.
    pub fn client_builder() -> ClientBuilder {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Client::builder().default_headers(headers)
    }

    /// Create with a custom reqwest [`Client`].
    pub fn with_client(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET /api/usuarios/
    pub async fn list(&self) -> Result<Vec<Usuario>> {
        let url = self.collection_url()?;
        let response = self.send(self.client.request(Method::GET, url)).await?;
        decode(response).await
    }

    /// POST /api/usuarios/
    pub async fn create(&self, usuario: &NewUsuario) -> Result<Usuario> {
        let url = self.collection_url()?;
        let response = self
            .send(self.client.request(Method::POST, url).json(usuario))
            .await?;
        decode(response).await
    }

    /// PUT /api/usuarios/{id}/
    pub async fn update(&self, id: UsuarioId, usuario: &NewUsuario) -> Result<Usuario> {
        let url = self.record_url(id)?;
        let response = self
            .send(self.client.request(Method::PUT, url).json(usuario))
            .await?;
        decode(response).await
    }

    /// DELETE /api/usuarios/{id}/
    ///
    /// The response body, if any, is ignored.
    pub async fn delete(&self, id: UsuarioId) -> Result<()> {
        let url = self.record_url(id)?;
        self.send(self.client.request(Method::DELETE, url)).await?;
        Ok(())
    }

    fn collection_url(&self) -> Result<Url> {
        self.base_url
            .join(USUARIOS_PATH)
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    fn record_url(&self, id: UsuarioId) -> Result<Url> {
        self.base_url
            .join(&format!("{USUARIOS_PATH}{id}/"))
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    /// Send a request, logging it and its response.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        debug!(%method, %url, "sending request");

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%method, %url, error = %e, "request failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!(%method, %url, status = status.as_u16(), "response received");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status.is_client_error() {
            warn!(%method, %url, status = status.as_u16(), %body, "API rejected request");
        } else {
            warn!(%method, %url, status = status.as_u16(), %body, "API server error");
        }

        Err(ApiError::Status { status, body })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    trace!(body = %String::from_utf8_lossy(&bytes), "response body");

    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(error = %e, "failed to decode response body");
        ApiError::Decode(e)
    })
}
