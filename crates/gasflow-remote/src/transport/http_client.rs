//! Blocking HTTP client with a per-request timeout.
//!
//! No retries: a failed call is reported once and the control loop moves on
//! with whatever strategy is still available.

use std::time::Duration;

use gasflow_core::config::RemoteConfig;
use gasflow_core::errors::TransportError;
use reqwest::blocking::{Client, Response};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};

/// Configuration for the HTTP transport layer.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL of the trainer API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self::from(&RemoteConfig::default())
    }
}

impl From<&RemoteConfig> for HttpClientConfig {
    fn from(config: &RemoteConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
        }
    }
}

/// HTTP transport client over `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    config: HttpClientConfig,
    client: Client,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Connect {
                url: config.base_url.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// GET `path`, succeeding on any 2xx status.
    pub fn get(&self, path: &str) -> Result<(), TransportError> {
        self.send(Method::GET, path, None::<&()>).map(drop)
    }

    /// GET `path` and decode a JSON body.
    pub fn get_json<Resp: DeserializeOwned>(&self, path: &str) -> Result<Resp, TransportError> {
        let url = self.url(path);
        self.send(Method::GET, path, None::<&()>)?
            .json::<Resp>()
            .map_err(|e| TransportError::Decode {
                url,
                reason: e.to_string(),
            })
    }

    /// POST a JSON body, succeeding on any 2xx status.
    pub fn post<Req: Serialize>(&self, path: &str, payload: &Req) -> Result<(), TransportError> {
        self.send(Method::POST, path, Some(payload)).map(drop)
    }

    /// POST a JSON body and return the response as text.
    pub fn post_text<Req: Serialize>(
        &self,
        path: &str,
        payload: &Req,
    ) -> Result<String, TransportError> {
        let url = self.url(path);
        self.send(Method::POST, path, Some(payload))?
            .text()
            .map_err(|e| TransportError::Decode {
                url,
                reason: e.to_string(),
            })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> Result<Response, TransportError> {
        let url = self.url(path);
        let mut request = self.client.request(method.clone(), &url);
        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().map_err(|e| TransportError::Connect {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        tracing::debug!(%method, %url, status = status.as_u16(), "trainer call");
        if status.is_success() {
            return Ok(response);
        }
        Err(TransportError::Status {
            url,
            status: status.as_u16(),
            body: response.text().unwrap_or_default(),
        })
    }
}
