//! Reasoner adapters.

mod anthropic;
mod mock;
mod openai;

pub use anthropic::{AnthropicConfig, AnthropicReasoner};
pub use mock::MockReasoner;
pub use openai::{OpenAiConfig, OpenAiReasoner};

use std::sync::Arc;

use crate::config::{ReasonerConfig, ReasonerProvider};
use crate::ports::Reasoner;

/// Builds the configured reasoner.
///
/// Assumes the configuration has been validated: the selected provider's
/// API key is present.
pub fn from_config(config: &ReasonerConfig) -> Arc<dyn Reasoner> {
    match config.provider {
        ReasonerProvider::Anthropic => {
            let key = config.anthropic_api_key.clone().unwrap_or_default();
            let mut provider_config = AnthropicConfig::new(key).with_timeout(config.timeout());
            if let Some(model) = &config.model {
                provider_config = provider_config.with_model(model.clone());
            }
            Arc::new(AnthropicReasoner::new(provider_config))
        }
        ReasonerProvider::OpenAI => {
            let key = config.openai_api_key.clone().unwrap_or_default();
            let mut provider_config = OpenAiConfig::new(key).with_timeout(config.timeout());
            if let Some(model) = &config.model {
                provider_config = provider_config.with_model(model.clone());
            }
            Arc::new(OpenAiReasoner::new(provider_config))
        }
    }
}
