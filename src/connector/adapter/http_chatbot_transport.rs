use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::{ChatbotTransport, TransportError, TransportResponse};
use crate::connector::AssistantConfig;
use crate::domain::DomainError;

/// [`ChatbotTransport`] backed by reqwest.
///
/// Posts JSON to `<base_url><path>`. Reads the body as text regardless of
/// status; interpreting it is the use case's job.
pub struct HttpChatbotTransport {
    client: reqwest::Client,
    config: AssistantConfig,
}

impl HttpChatbotTransport {
    pub fn new(config: AssistantConfig) -> Result<Self, DomainError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DomainError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }
}

#[async_trait]
impl ChatbotTransport for HttpChatbotTransport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<TransportResponse, TransportError> {
        let url = self.config.endpoint(path);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!("HttpChatbotTransport: request to {url} failed: {e}");
                TransportError(format!("request to {url} failed: {e}"))
            })?;

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("HttpChatbotTransport: could not read body of {status} response: {e}");
                None
            }
        };

        Ok(TransportResponse {
            status: Some(status),
            body,
        })
    }
}
