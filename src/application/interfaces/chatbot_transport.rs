use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Raw outcome of one HTTP exchange, before any interpretation.
///
/// `status` is `None` when the transport produced a response without a usable
/// status code. `body` is `None` when the body could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: Option<u16>,
    pub body: Option<String>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: Some(body.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(s) if (200..300).contains(&s))
    }
}

/// The request never produced a response (DNS, refused connection, timeout...).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends JSON to the assistant backend.
///
/// Implementors own the base URL, HTTP client, and headers; callers only
/// supply the endpoint path and the body.
#[async_trait]
pub trait ChatbotTransport: Send + Sync {
    async fn post_json(&self, path: &str, body: &Value) -> Result<TransportResponse, TransportError>;
}
