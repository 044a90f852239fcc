//! HTTP pipeline shared by every Compose API call
//!
//! Each call is one request/response round trip: the bearer token is
//! attached, any status above 202 becomes a [`ComposeError`], and the body
//! is decoded as JSON into the caller's type.

use std::fmt;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ComposeError, Result};

pub const API_PROTOCOL: &str = "https";
pub const API_HOST: &str = "api.compose.io";
pub const API_VERSION: &str = "2016-07";

/// Environment variable holding the API token
pub const TOKEN_ENV_VAR: &str = "COMPOSE_TOKEN";
/// Environment variable overriding the API base URL
pub const API_URL_ENV_VAR: &str = "COMPOSE_API_URL";

const DEFAULT_USER_AGENT: &str = concat!("compose-client/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const JSON: &str = "application/json";
const HAL_JSON: &str = "application/hal+json";

/// Highest status code treated as success
const MAX_SUCCESS_STATUS: u16 = 202;

/// `https://api.compose.io/2016-07`
pub fn default_api_url() -> String {
    format!("{}://{}/{}", API_PROTOCOL, API_HOST, API_VERSION)
}

/// Read the API token from `COMPOSE_TOKEN`
///
/// An unset or empty variable is [`ComposeError::MissingToken`].
pub fn api_token_from_env() -> Result<String> {
    match std::env::var(TOKEN_ENV_VAR) {
        Ok(token) if !token.is_empty() => Ok(token),
        _ => Err(ComposeError::MissingToken),
    }
}

/// Client for the Compose platform API
#[derive(Clone)]
pub struct ComposeClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl fmt::Debug for ComposeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposeClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Builder for [`ComposeClient`]
#[derive(Debug, Clone)]
pub struct ComposeClientBuilder {
    token: Option<String>,
    base_url: String,
    user_agent: String,
    timeout: Duration,
}

impl Default for ComposeClientBuilder {
    fn default() -> Self {
        Self {
            token: None,
            base_url: default_api_url(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ComposeClientBuilder {
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base URL including the API version path, e.g. `https://api.compose.io/2016-07`
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ComposeClient> {
        let token = self
            .token
            .filter(|t| !t.is_empty())
            .ok_or(ComposeError::MissingToken)?;

        let base_url = self.base_url.trim_end_matches('/').to_string();
        let parsed = url::Url::parse(&base_url).map_err(|e| ComposeError::InvalidUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || parsed.host_str().is_none() {
            return Err(ComposeError::InvalidUrl {
                url: base_url,
                reason: "URL must be absolute with a host".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .timeout(self.timeout)
            .build()?;

        Ok(ComposeClient {
            http,
            base_url,
            token,
        })
    }
}

impl ComposeClient {
    pub fn builder() -> ComposeClientBuilder {
        ComposeClientBuilder::default()
    }

    /// Client for `api_url` authenticated with `token`
    pub fn new(token: impl Into<String>, api_url: impl Into<String>) -> Result<Self> {
        Self::builder().token(token).base_url(api_url).build()
    }

    /// Client configured from `COMPOSE_TOKEN` and, if set, `COMPOSE_API_URL`
    pub fn from_env() -> Result<Self> {
        let token = api_token_from_env()?;
        let base_url = std::env::var(API_URL_ENV_VAR).unwrap_or_else(|_| default_api_url());
        Self::new(token, base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and return the body bytes of a successful response
    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        let content_type = if method == Method::POST {
            JSON
        } else {
            HAL_JSON
        };
        debug!("{} {}", method, path);

        let mut request = self
            .http
            .request(method, &url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, content_type);
        if let Some(body) = body {
            trace!("Request body: {} bytes", body.len());
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                ComposeError::ConnectionError(e.to_string())
            } else {
                ComposeError::RequestFailed(e)
            }
        })?;

        let status = response.status().as_u16();
        debug!("{} -> {}", path, status);

        if status > MAX_SUCCESS_STATUS {
            let message = response.text().await.unwrap_or_default();
            trace!("Error body: {}", message);
            return Err(ComposeError::from_status(status, message));
        }

        let bytes = response.bytes().await?;
        trace!("Response body: {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    /// Run the pipeline and decode the response as `T`
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T> {
        let bytes = self.send(method, path, body).await?;
        serde_json::from_slice(&bytes).map_err(|source| ComposeError::Decode {
            path: path.to_string(),
            source,
        })
    }

    pub(crate) fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
        serde_json::to_vec(body).map_err(ComposeError::Serialize)
    }

    async fn request_raw(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let body = body.as_ref().map(Self::encode).transpose()?;
        let bytes = self.send(method, path, body).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|source| ComposeError::Decode {
            path: path.to_string(),
            source,
        })
    }

    /// GET an arbitrary path, returning the JSON body untyped
    pub async fn get_raw(&self, path: &str) -> Result<Value> {
        self.request_raw(Method::GET, path, None).await
    }

    pub async fn post_raw(&self, path: &str, body: Value) -> Result<Value> {
        self.request_raw(Method::POST, path, Some(body)).await
    }

    pub async fn put_raw(&self, path: &str, body: Value) -> Result<Value> {
        self.request_raw(Method::PUT, path, Some(body)).await
    }

    pub async fn patch_raw(&self, path: &str, body: Value) -> Result<Value> {
        self.request_raw(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete_raw(&self, path: &str) -> Result<Value> {
        self.request_raw(Method::DELETE, path, None).await
    }
}
