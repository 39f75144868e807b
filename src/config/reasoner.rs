//! Reasoner provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Reasoner provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReasonerConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Anthropic API key
    pub anthropic_api_key: Option<String>,

    /// Which provider to call
    #[serde(default)]
    pub provider: ReasonerProvider,

    /// Model identifier passed to the provider
    pub model: Option<String>,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Language the counterpart writes in, passed as an input feature
    #[serde(default = "default_language")]
    pub language: String,
}

/// Reasoner provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReasonerProvider {
    OpenAI,
    #[default]
    Anthropic,
}

impl ReasonerConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key
            .as_ref()
            .is_some_and(|k| !k.is_empty())
    }

    /// Validate reasoner configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_openai() && !self.has_anthropic() {
            return Err(ValidationError::NoReasonerConfigured);
        }

        match self.provider {
            ReasonerProvider::OpenAI if !self.has_openai() => {
                Err(ValidationError::MissingRequired("OPENAI_API_KEY"))
            }
            ReasonerProvider::Anthropic if !self.has_anthropic() => {
                Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"))
            }
            _ => Ok(()),
        }
    }
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            anthropic_api_key: None,
            provider: ReasonerProvider::default(),
            model: None,
            timeout_secs: default_timeout(),
            language: default_language(),
        }
    }
}

fn default_timeout() -> u64 {
    60
}

fn default_language() -> String {
    "pt-BR".to_string()
}
