//! Reception flow: get the manager's contact past the front desk.

use std::sync::Arc;

use crate::config::EngineLimits;
use crate::domain::conversation::{
    greeting_for_hour, render_history, split_reply, validate_reception, ReceptionContext,
    ReceptionProposal, ReceptionState, FIRST_MESSAGE,
};
use crate::domain::extraction::{extract_name, extract_phone};
use crate::ports::{Reasoner, ReasonerRequest, ReasonerStep};

use super::infer_or_fallback;

const RECEPTION_DIRECTIVE: &str = "You are a commercial agent messaging a clinic's reception \
to obtain the manager's direct WhatsApp contact. Open by confirming the clinic, then ask for \
the manager. Questions and obstacles from the reception are objections to handle politely and \
briefly; never give up on the first rejection. Keep messages short, no emojis, not overly \
formal, and greet according to the provided greeting. Report the stage as one of: opening, \
requesting, handling_objection, success, failed. When a contact is mentioned, echo it in the \
phone field and the contact's name in the name field; use the literal null when absent.";

/// Validated outcome of one reception turn.
#[derive(Debug, Clone)]
pub struct ReceptionReply {
    /// Outbound messages to deliver, in order.
    pub messages: Vec<String>,
    /// Authoritative stage and entities.
    pub state: ReceptionState,
    /// Reasoner rationale, for audit logs.
    pub reasoning: String,
}

/// Handler for the reception flow.
pub struct ReceptionTurnHandler {
    reasoner: Arc<dyn Reasoner>,
    limits: EngineLimits,
}

impl ReceptionTurnHandler {
    /// Creates a handler calling the given reasoner.
    pub fn new(reasoner: Arc<dyn Reasoner>, limits: EngineLimits) -> Self {
        Self { reasoner, limits }
    }

    /// Runs one reception turn. Never fails.
    pub async fn handle(&self, context: ReceptionContext) -> ReceptionReply {
        let request = ReasonerRequest::new(ReasonerStep::ReceptionTurn, RECEPTION_DIRECTIVE)
            .with_input("clinic_name", context.clinic_name.clone())
            .with_input("greeting", greeting_for_hour(context.current_hour))
            .with_input("history", render_history(&context.history))
            .with_input(
                "latest_message",
                context
                    .latest_message
                    .clone()
                    .unwrap_or_else(|| FIRST_MESSAGE.to_string()),
            )
            .with_input("attempt_count", context.attempt_count.to_string());

        let record = infer_or_fallback(self.reasoner.as_ref(), request).await;

        let contact = extract_phone(record.phone.as_deref(), self.limits.min_phone_digits);
        let contact_name = extract_name(record.name.as_deref());

        let state = validate_reception(
            ReceptionProposal {
                stage: record.stage.as_deref(),
                contact,
                contact_name,
                attempt_count: context.attempt_count,
            },
            self.limits.max_attempts,
        );

        tracing::info!(
            stage = state.stage.label(),
            has_contact = state.contact.is_some(),
            should_continue = state.should_continue,
            "validated reception turn"
        );

        ReceptionReply {
            messages: record.reply.as_deref().map(split_reply).unwrap_or_default(),
            state,
            reasoning: record.reasoning.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::reasoner::MockReasoner;
    use crate::domain::classification::RawClassification;
    use crate::domain::conversation::{ReceptionStage, Turn};

    fn context(latest: Option<&str>, attempts: u32) -> ReceptionContext {
        ReceptionContext {
            clinic_name: "Clínica Sorriso".to_string(),
            history: vec![Turn::agent("Bom dia, é da clínica Sorriso?")],
            latest_message: latest.map(str::to_string),
            current_hour: 10,
            attempt_count: attempts,
        }
    }

    fn handler(reasoner: MockReasoner) -> ReceptionTurnHandler {
        ReceptionTurnHandler::new(Arc::new(reasoner), EngineLimits::default())
    }

    #[tokio::test]
    async fn extracted_contact_forces_success() {
        let reasoner = MockReasoner::new().with_record(
            RawClassification::reply_only("Obrigado!")
                .with_stage("requesting")
                .with_phone("Anota aí: 11 98765-4321")
                .with_name("null"),
        );

        let reply = handler(reasoner)
            .handle(context(Some("anota o número do gestor"), 2))
            .await;

        assert_eq!(reply.state.stage, ReceptionStage::Success);
        assert_eq!(reply.state.contact.as_deref(), Some("11987654321"));
        assert_eq!(reply.state.contact_name, None);
        assert!(!reply.state.should_continue);
    }

    #[tokio::test]
    async fn short_numbers_do_not_count_as_contact() {
        let reasoner = MockReasoner::new().with_record(
            RawClassification::reply_only("Pode mandar o número completo?")
                .with_stage("handling_objection")
                .with_phone("9999"),
        );

        let reply = handler(reasoner).handle(context(Some("é 9999"), 2)).await;

        assert_eq!(reply.state.stage, ReceptionStage::HandlingObjection);
        assert_eq!(reply.state.contact, None);
        assert!(reply.state.should_continue);
    }

    #[tokio::test]
    async fn unknown_stage_repairs_to_requesting() {
        let reasoner = MockReasoner::new()
            .with_record(RawClassification::reply_only("...").with_stage("negotiating"));

        let reply = handler(reasoner).handle(context(Some("alô"), 1)).await;

        assert_eq!(reply.state.stage, ReceptionStage::Requesting);
    }

    #[tokio::test]
    async fn attempt_ceiling_forces_failed() {
        let reasoner = MockReasoner::new()
            .with_record(RawClassification::reply_only("Insisto...").with_stage("requesting"));

        let reply = handler(reasoner).handle(context(Some("não"), 6)).await;

        assert_eq!(reply.state.stage, ReceptionStage::Failed);
        assert!(!reply.state.should_continue);
    }

    #[tokio::test]
    async fn first_message_sentinel_is_sent_when_opening() {
        let reasoner = MockReasoner::new();
        let handler = handler(reasoner.clone());

        handler.handle(context(None, 0)).await;

        let calls = reasoner.calls();
        let latest = calls[0]
            .inputs
            .iter()
            .find(|f| f.name == "latest_message")
            .map(|f| f.value.clone());
        assert_eq!(latest.as_deref(), Some(FIRST_MESSAGE));
    }
}
