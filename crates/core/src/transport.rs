//! Transport trait — the abstraction over how requests reach the routing
//! service.
//!
//! A Transport performs exactly one request per call and hands back the
//! unwrapped envelope payload. Implementations: HTTP (`drift-client`),
//! scripted in-memory transports in tests.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// HTTP methods used by the routing service's API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The core Transport trait.
///
/// `path` already carries any prefix the deployment needs. The returned
/// value is the envelope's `data` member, or JSON `null` when a successful
/// envelope has none. Failures are [`TransportError`](crate::TransportError)s
/// wrapped in [`Error::Transport`](crate::Error::Transport); nothing is
/// retried.
#[async_trait]
pub trait Transport: Send + Sync {
    /// A human-readable name for this transport (e.g., "http").
    fn name(&self) -> &str;

    /// Issue one request and return the unwrapped payload.
    async fn request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> Result<Value>;
}
