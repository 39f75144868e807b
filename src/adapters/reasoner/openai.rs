//! OpenAI reasoner - implementation of [`Reasoner`] for the Chat
//! Completions API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let reasoner = OpenAiReasoner::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::classification::RawClassification;
use crate::ports::{Reasoner, ReasonerError, ReasonerInfo, ReasonerRequest};

/// Configuration for the OpenAI reasoner.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
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

/// OpenAI reasoner implementation.
pub struct OpenAiReasoner {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiReasoner {
    /// Creates a new OpenAI reasoner with the given configuration.
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn to_wire_request(&self, request: &ReasonerRequest) -> OpenAiWireRequest {
        OpenAiWireRequest {
            model: self.config.model.clone(),
            messages: vec![
                OpenAiMessage {
                    role: "system".to_string(),
                    content: request.system_prompt(),
                },
                OpenAiMessage {
                    role: "user".to_string(),
                    content: request.user_prompt(),
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object".to_string(),
            },
        }
    }

    async fn send_request(&self, request: &ReasonerRequest) -> Result<Response, ReasonerError> {
        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
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
            401 => Err(ReasonerError::AuthenticationFailed),
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
impl Reasoner for OpenAiReasoner {
    async fn infer(&self, request: ReasonerRequest) -> Result<RawClassification, ReasonerError> {
        tracing::debug!(
            step = request.step.label(),
            trace_id = %request.trace_id,
            model = %self.config.model,
            "calling openai reasoner"
        );

        let response = self.send_request(&request).await?;
        let response = self.handle_response_status(response).await?;

        let wire: OpenAiWireResponse = response
            .json()
            .await
            .map_err(|e| ReasonerError::network(format!("Failed to read response: {}", e)))?;

        let text = wire
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        // Malformed content is repaired, never an error.
        Ok(RawClassification::from_text(&text))
    }

    fn info(&self) -> ReasonerInfo {
        ReasonerInfo::new("openai", self.config.model.clone())
    }
}

#[derive(Debug, Serialize)]
struct OpenAiWireRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiWireResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}
