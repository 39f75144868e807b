//! Raw reasoner output.
//!
//! One reasoner call yields a single loosely-typed record. Every field is
//! optional and untrusted: the reasoner may emit the wrong type, an
//! out-of-enum value, or nothing at all. Consumers must go through the
//! normalizer, coercer and extractor rather than reading fields directly.

use serde::Deserialize;
use serde_json::Value;

/// The literal output of one reasoner call, before reconciliation.
///
/// Deserialization is lenient: unknown fields are ignored, missing fields
/// default to null. Building one of these can therefore never fail.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawClassification {
    /// Proposed category tags. Array, delimited string, or garbage.
    pub categories: Value,

    /// Proposed conversation stage, free text.
    pub stage: Option<String>,

    /// Reply text for the counterpart, possibly `|||`-separated.
    pub reply: Option<String>,

    /// Free-text rationale for the proposal.
    pub reasoning: Option<String>,

    /// Confidence guess; number or text.
    pub confidence: Value,

    /// Urgency guess; number or text.
    pub urgency: Value,

    /// Phone contact guess, free text.
    pub phone: Option<String>,

    /// Person name guess, free text.
    pub name: Option<String>,

    /// Date-time guess, free text.
    pub datetime: Option<String>,

    /// Whether the reasoner believes the conversation should continue.
    pub should_continue: Value,

    /// Review verdict guess.
    pub approved: Value,

    /// Diagnosis text produced by the analysis step.
    pub diagnosis: Option<String>,

    /// Strategy name produced by the strategy-selection step.
    pub strategy: Option<String>,
}

impl RawClassification {
    /// Builds a record from raw reasoner text.
    ///
    /// Recovers a JSON object from surrounding prose or a markdown code
    /// block and parses it leniently. If no object can be recovered, the
    /// whole text becomes the reply; this function never fails.
    pub fn from_text(text: &str) -> Self {
        if let Some(json) = recover_json_object(text) {
            if let Ok(record) = serde_json::from_str::<Self>(&json) {
                return record;
            }
        }

        Self {
            reply: Some(text.trim().to_string()),
            ..Self::default()
        }
    }

    /// Builds a record that carries only a reply.
    pub fn reply_only(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            ..Self::default()
        }
    }

    /// Sets the proposed categories.
    pub fn with_categories(mut self, categories: Value) -> Self {
        self.categories = categories;
        self
    }

    /// Sets the proposed stage.
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    /// Sets the reply text.
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    /// Sets the rationale text.
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    /// Sets the phone contact guess.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the person name guess.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the date-time guess.
    pub fn with_datetime(mut self, datetime: impl Into<String>) -> Self {
        self.datetime = Some(datetime.into());
        self
    }

    /// Sets the approval verdict.
    pub fn with_approved(mut self, approved: Value) -> Self {
        self.approved = approved;
        self
    }
}

/// Recovers a JSON object from text that may wrap it in prose or a
/// markdown code block.
fn recover_json_object(text: &str) -> Option<String> {
    let trimmed = text.trim();

    if let Some(json) = extract_from_code_block(trimmed) {
        return Some(json);
    }

    let start = trimmed.find('{')?;
    extract_balanced_object(trimmed, start)
}

fn extract_from_code_block(s: &str) -> Option<String> {
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    for pattern in patterns {
        if let Some(start) = s.find(pattern) {
            let json_start = start + pattern.len();
            if let Some(end) = s[json_start..].find("```") {
                return Some(s[json_start..json_start + end].trim().to_string());
            }
        }
    }
    None
}

fn extract_balanced_object(s: &str, start: usize) -> Option<String> {
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(s[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }
    None
}
