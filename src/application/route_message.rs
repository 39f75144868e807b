//! Routing flow: classify one inbound message and pick the next branch.

use std::sync::Arc;

use crate::domain::conversation::{render_history, split_reply, RoutingContext};
use crate::domain::intent::{
    coerce_confidence, coerce_urgency, dispatch, normalize_categories, IntentCategory, RouteBranch,
};
use crate::ports::{Reasoner, ReasonerRequest, ReasonerStep};

use super::infer_or_fallback;

const CLASSIFY_DIRECTIVE: &str = "You are the global intent classifier for an aesthetic \
clinic's messaging desk. Interpret the counterpart's message in the given language and map it \
onto the standardized categories: SESSION_START, SESSION_CLOSURE, SERVICE_SCHEDULING, \
SERVICE_RESCHEDULING, SERVICE_CANCELLATION, MEDICAL_ASSESSMENT, PROCEDURE_INQUIRY, \
AD_CONVERSION, ORGANIC_INQUIRY, OFFER_CONVERSION, REENGAGEMENT_RECOVERY, GENERAL_INFO, \
IMAGE_ASSESSMENT, HUMAN_ESCALATION, UNCLASSIFIED. Multiple categories are allowed. Always \
prioritize MEDICAL_ASSESSMENT when health is at risk; use UNCLASSIFIED when ambiguous. Score \
urgency 1-5 by clinical risk and confidence 0.0-1.0, and explain the decision in the \
reasoning field.";

/// Validated outcome of one routing turn.
#[derive(Debug, Clone)]
pub struct RoutedMessage {
    /// Normalized categories, order-preserving, never empty.
    pub categories: Vec<IntentCategory>,
    /// The single branch selected by priority, if any.
    pub branch: Option<RouteBranch>,
    /// Urgency 1-5.
    pub urgency: u8,
    /// Confidence 0.0-1.0.
    pub confidence: f64,
    /// Classifier rationale, for audit logs.
    pub reasoning: String,
    /// Outbound messages, if the reasoner drafted any.
    pub reply: Vec<String>,
}

/// Handler for the routing flow.
pub struct RouteMessageHandler {
    reasoner: Arc<dyn Reasoner>,
    language: String,
}

impl RouteMessageHandler {
    /// Creates a handler calling the given reasoner.
    pub fn new(reasoner: Arc<dyn Reasoner>, language: impl Into<String>) -> Self {
        Self {
            reasoner,
            language: language.into(),
        }
    }

    /// Classifies one inbound message. Never fails.
    pub async fn handle(&self, context: RoutingContext) -> RoutedMessage {
        let request = ReasonerRequest::new(ReasonerStep::Classify, CLASSIFY_DIRECTIVE)
            .with_input("language", self.language.clone())
            .with_input("history", render_history(&context.history))
            .with_input("intake_status", context.intake_status.label())
            .with_input("schedule_status", context.schedule_status.label())
            .with_input("reschedule_status", context.reschedule_status.label())
            .with_input("cancel_status", context.cancel_status.label())
            .with_input("latest_message", context.latest_message.clone());

        let record = infer_or_fallback(self.reasoner.as_ref(), request).await;

        let categories = normalize_categories(&record.categories);
        let branch = dispatch(&categories);

        tracing::info!(
            categories = ?categories,
            branch = branch.map(|b| b.label()),
            "routed inbound message"
        );

        RoutedMessage {
            branch,
            urgency: coerce_urgency(&record.urgency),
            confidence: coerce_confidence(&record.confidence),
            reasoning: record.reasoning.unwrap_or_default(),
            reply: record.reply.as_deref().map(split_reply).unwrap_or_default(),
            categories,
        }
    }
}
