//! HTTP transport over `reqwest`.
//!
//! One outbound request per call, raced against the configured timeout.
//! The response body is parsed as an [`Envelope`] and unwrapped; failures
//! surface as [`TransportError`]s and are never retried.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use drift_config::ClientConfig;
use drift_core::envelope::Envelope;
use drift_core::error::{Error, Result, TransportError};
use drift_core::transport::{HttpMethod, Transport};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, warn};

/// Issues requests against the routing service's base URL.
pub struct HttpTransport {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport from a validated config.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;
        Self::with_client(config, client)
    }

    /// Create a transport around an existing `reqwest` client.
    pub fn with_client(config: &ClientConfig, client: reqwest::Client) -> Result<Self> {
        let config = config.clone().normalized();
        config.validate()?;

        Ok(Self {
            base_url: config.base_url,
            api_key: config.api_key,
            timeout: Duration::from_millis(config.timeout_ms),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send the request and unwrap the envelope, without the timeout.
    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> std::result::Result<Value, TransportError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.client.request(to_reqwest_method(method), &url);
        if let Some(body) = &body {
            request = request.header(CONTENT_TYPE, "application/json").json(body);
        }
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| self.map_reqwest_error(e))?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let envelope: Envelope<Value> = serde_json::from_slice(&bytes).map_err(|e| {
            TransportError::Protocol(format!("response from {path} (status {status}) is not an envelope: {e}"))
        })?;

        Ok(envelope.into_result(status)?.unwrap_or(Value::Null))
    }

    fn map_reqwest_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout_ms: self.timeout_ms(),
            }
        } else {
            TransportError::Network(e.to_string())
        }
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> Result<Value> {
        let started = Instant::now();
        debug!(%method, path, has_body = body.is_some(), "Sending request");

        // Dropping the in-flight future on timeout aborts the connection; the
        // timer is owned by the race and dropped with it on every exit path.
        let result = match tokio::time::timeout(self.timeout, self.send(method, path, body)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout {
                timeout_ms: self.timeout_ms(),
            }),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => debug!(%method, path, elapsed_ms, "Request succeeded"),
            Err(e) => warn!(%method, path, elapsed_ms, error = %e, "Request failed"),
        }

        result.map_err(Error::from)
    }
}
