//! Reasoner port - interface to the external text classifier.
//!
//! The reasoner is a black box: structured context plus text goes in, a
//! loosely-typed [`RawClassification`] comes out. Adapters translate to a
//! concrete provider API. Malformed output is never an error at this
//! boundary - adapters degrade it to a partial record; only transport
//! failures surface as [`ReasonerError`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::classification::RawClassification;

/// Port for reasoner calls.
#[async_trait]
pub trait Reasoner: Send + Sync {
    /// Runs one inference step.
    ///
    /// Implementations must apply a timeout; the core never retries.
    async fn infer(&self, request: ReasonerRequest) -> Result<RawClassification, ReasonerError>;

    /// Provider information for logging and health reporting.
    fn info(&self) -> ReasonerInfo;
}

/// Which pipeline step a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonerStep {
    /// Intent classification of an inbound message.
    Classify,
    /// One reception-flow turn.
    ReceptionTurn,
    /// One scheduling-flow turn.
    SchedulingTurn,
    /// Reengagement: diagnose why the lead went cold.
    Analyze,
    /// Reengagement: pick an approach.
    SelectStrategy,
    /// Reengagement: draft the message.
    Generate,
    /// Reengagement: review the draft.
    Review,
}

impl ReasonerStep {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Classify => "classify",
            Self::ReceptionTurn => "reception_turn",
            Self::SchedulingTurn => "scheduling_turn",
            Self::Analyze => "analyze",
            Self::SelectStrategy => "select_strategy",
            Self::Generate => "generate",
            Self::Review => "review",
        }
    }
}

/// A named input rendered into the reasoner prompt.
#[derive(Debug, Clone)]
pub struct InputField {
    pub name: &'static str,
    pub value: String,
}

/// One reasoner request: a directive plus named inputs.
#[derive(Debug, Clone)]
pub struct ReasonerRequest {
    /// Which step this call implements.
    pub step: ReasonerStep,
    /// Task directive; becomes the system prompt.
    pub directive: String,
    /// Named inputs, rendered in order into the user message.
    pub inputs: Vec<InputField>,
    /// Trace id for correlating logs across the turn.
    pub trace_id: String,
}

/// Instruction appended to every directive so providers answer in the one
/// shape [`RawClassification::from_text`] can digest.
const OUTPUT_CONTRACT: &str = "Answer with a single JSON object. Use only these keys, omitting \
any that do not apply: categories, stage, reply, reasoning, confidence, urgency, phone, name, \
datetime, should_continue, approved, diagnosis, strategy. Do not wrap the object in prose.";

impl ReasonerRequest {
    /// Creates a request for a step with the given directive.
    pub fn new(step: ReasonerStep, directive: impl Into<String>) -> Self {
        Self {
            step,
            directive: directive.into(),
            inputs: Vec::new(),
            trace_id: Uuid::new_v4().to_string(),
        }
    }

    /// Adds a named input.
    pub fn with_input(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.inputs.push(InputField {
            name,
            value: value.into(),
        });
        self
    }

    /// Overrides the trace id (for correlating multi-step runs).
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }

    /// Full system prompt: the directive plus the output contract.
    pub fn system_prompt(&self) -> String {
        format!("{}\n\n{}", self.directive, OUTPUT_CONTRACT)
    }

    /// User message: the named inputs, one block per field.
    pub fn user_prompt(&self) -> String {
        self.inputs
            .iter()
            .map(|field| format!("{}:\n{}", field.name, field.value))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonerInfo {
    /// Provider name (e.g. "anthropic", "openai", "mock").
    pub name: String,
    /// Model identifier.
    pub model: String,
}

impl ReasonerInfo {
    /// Creates provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Reasoner transport errors.
///
/// Malformed output is deliberately absent: the adapters repair it into a
/// partial record instead of failing the turn.
#[derive(Debug, thiserror::Error)]
pub enum ReasonerError {
    /// Request timed out.
    #[error("reasoner timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Provider is unavailable.
    #[error("reasoner unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ReasonerError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
