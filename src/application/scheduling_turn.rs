//! Scheduling flow: close a meeting with the clinic manager.

use std::sync::Arc;

use crate::config::EngineLimits;
use crate::domain::conversation::{
    greeting_for_hour, render_history, split_reply, validate_scheduling, SchedulingContext,
    SchedulingProposal, SchedulingState, FIRST_MESSAGE,
};
use crate::domain::extraction::extract_datetime;
use crate::ports::{Reasoner, ReasonerRequest, ReasonerStep};

use super::infer_or_fallback;

const SCHEDULING_DIRECTIVE: &str = "You are a commercial agent talking to a clinic manager on \
WhatsApp to book a short demo call. Greet personally, pitch briefly, then propose concrete \
times only from the provided available slots. Keep messages short, no emojis, no pressure; \
separate multiple messages with |||. Report the stage as one of: greeting, pitching, \
proposing_time, confirming, scheduled, lost. When a meeting time is agreed, echo the exact \
ISO date-time in the datetime field; otherwise use the literal null. A counter-question from \
the manager is not a confirmation.";

/// No-slots marker the reasoner sees instead of an empty list.
const NO_SLOTS: &str = "Sem horários disponíveis";

/// Validated outcome of one scheduling turn.
#[derive(Debug, Clone)]
pub struct SchedulingReply {
    /// Outbound messages to deliver, in order.
    pub messages: Vec<String>,
    /// Authoritative stage and meeting time.
    pub state: SchedulingState,
    /// Reasoner rationale, for audit logs.
    pub reasoning: String,
}

/// Handler for the scheduling flow.
pub struct SchedulingTurnHandler {
    reasoner: Arc<dyn Reasoner>,
    limits: EngineLimits,
}

impl SchedulingTurnHandler {
    /// Creates a handler calling the given reasoner.
    pub fn new(reasoner: Arc<dyn Reasoner>, limits: EngineLimits) -> Self {
        Self { reasoner, limits }
    }

    /// Runs one scheduling turn. Never fails.
    pub async fn handle(&self, context: SchedulingContext) -> SchedulingReply {
        let slots = if context.available_slots.is_empty() {
            NO_SLOTS.to_string()
        } else {
            context.available_slots.join(", ")
        };

        let request = ReasonerRequest::new(ReasonerStep::SchedulingTurn, SCHEDULING_DIRECTIVE)
            .with_input("manager_name", context.manager_name.clone())
            .with_input("clinic_name", context.clinic_name.clone())
            .with_input(
                "specialty",
                context.specialty.clone().unwrap_or_else(|| "saúde".to_string()),
            )
            .with_input("greeting", greeting_for_hour(context.current_hour))
            .with_input("history", render_history(&context.history))
            .with_input(
                "latest_message",
                context
                    .latest_message
                    .clone()
                    .unwrap_or_else(|| FIRST_MESSAGE.to_string()),
            )
            .with_input("available_slots", slots)
            .with_input("attempt_count", context.attempt_count.to_string());

        let record = infer_or_fallback(self.reasoner.as_ref(), request).await;

        let state = validate_scheduling(
            SchedulingProposal {
                stage: record.stage.as_deref(),
                meeting_datetime: extract_datetime(record.datetime.as_deref()),
                latest_message: context.latest_message.as_deref(),
                attempt_count: context.attempt_count,
                has_open_slots: !context.available_slots.is_empty(),
            },
            self.limits.max_attempts,
        );

        tracing::info!(
            stage = state.stage.label(),
            meeting_confirmed = state.meeting_confirmed(),
            should_continue = state.should_continue,
            "validated scheduling turn"
        );

        SchedulingReply {
            messages: record.reply.as_deref().map(split_reply).unwrap_or_default(),
            state,
            reasoning: record.reasoning.unwrap_or_default(),
        }
    }
}
