//! Anthropic reasoner - implementation of [`Reasoner`] for the Claude
//! Messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-sonnet-4-20250514")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let reasoner = AnthropicReasoner::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::classification::RawClassification;
use crate::ports::{Reasoner, ReasonerError, ReasonerInfo, ReasonerRequest};

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic reasoner.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl AnthropicConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic reasoner implementation.
pub struct AnthropicReasoner {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicReasoner {
    /// Creates a new Anthropic reasoner with the given configuration.
    pub fn new(config: AnthropicConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url)
    }

    fn to_wire_request(&self, request: &ReasonerRequest) -> AnthropicRequest {
        AnthropicRequest {
            model: self.config.model.clone(),
            system: request.system_prompt(),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: request.user_prompt(),
            }],
            max_tokens: 1024,
        }
    }

    async fn send_request(&self, request: &ReasonerRequest) -> Result<Response, ReasonerError> {
        self.client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&self.to_wire_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ReasonerError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    ReasonerError::network(format!("Connection failed: {}", e))
                } else {
                    ReasonerError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, ReasonerError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(ReasonerError::AuthenticationFailed),
            429 => Err(ReasonerError::RateLimited {
                retry_after_secs: 30,
            }),
            400 => Err(ReasonerError::InvalidRequest(error_body)),
            500..=599 => Err(ReasonerError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(ReasonerError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait]
impl Reasoner for AnthropicReasoner {
    async fn infer(&self, request: ReasonerRequest) -> Result<RawClassification, ReasonerError> {
        tracing::debug!(
            step = request.step.label(),
            trace_id = %request.trace_id,
            model = %self.config.model,
            "calling anthropic reasoner"
        );

        let response = self.send_request(&request).await?;
        let response = self.handle_response_status(response).await?;

        let wire: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| ReasonerError::network(format!("Failed to read response: {}", e)))?;

        let text: String = wire
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .collect();

        // Malformed content is repaired, never an error.
        Ok(RawClassification::from_text(&text))
    }

    fn info(&self) -> ReasonerInfo {
        ReasonerInfo::new("anthropic", self.config.model.clone())
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    system: String,
    messages: Vec<AnthropicMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContentBlock>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ReasonerStep;

    #[test]
    fn config_builders_apply() {
        let config = AnthropicConfig::new("sk-ant-test")
            .with_model("claude-haiku-4")
            .with_base_url("http://localhost:9999")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.model, "claude-haiku-4");
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn wire_request_carries_system_and_user_prompts() {
        let reasoner = AnthropicReasoner::new(AnthropicConfig::new("sk-ant-test"));
        let request = ReasonerRequest::new(ReasonerStep::Classify, "Classify.")
            .with_input("latest_message", "oi");

        let wire = reasoner.to_wire_request(&request);

        assert!(wire.system.starts_with("Classify."));
        assert_eq!(wire.messages.len(), 1);
        assert_eq!(wire.messages[0].role, "user");
        assert!(wire.messages[0].content.contains("latest_message"));
    }

    #[test]
    fn info_names_the_provider() {
        let reasoner = AnthropicReasoner::new(AnthropicConfig::new("sk-ant-test"));
        assert_eq!(reasoner.info().name, "anthropic");
    }

    #[test]
    fn content_block_deserializes_without_text() {
        let block: AnthropicContentBlock =
            serde_json::from_str(r#"{"type": "tool_use"}"#).unwrap();
        assert_eq!(block.kind, "tool_use");
        assert!(block.text.is_empty());
    }
}
