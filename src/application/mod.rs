//! Application layer - per-flow handlers.
//!
//! Each handler builds the reasoner request for its flow, survives reasoner
//! failure with a stage-neutral fallback, and runs the raw record through
//! the domain reconciliation before anything reaches a caller.

mod reception_turn;
mod reengage_lead;
mod route_message;
mod scheduling_turn;

pub use reception_turn::{ReceptionReply, ReceptionTurnHandler};
pub use reengage_lead::{ReengageLeadHandler, ReengagedLead};
pub use route_message::{RouteMessageHandler, RoutedMessage};
pub use scheduling_turn::{SchedulingReply, SchedulingTurnHandler};

use crate::domain::classification::RawClassification;
use crate::ports::{Reasoner, ReasonerRequest};

/// Stage-neutral reply used when the reasoner itself fails.
pub const TECHNICAL_DIFFICULTY_REPLY: &str =
    "Desculpe, estou com uma dificuldade técnica no momento. Já te retorno em instantes.";

/// Calls the reasoner, degrading transport failure to a synthetic record.
///
/// The fallback carries no stage proposal, so the validator lands on the
/// flow's in-progress default and the conversation keeps going; the failure
/// is reported through the record's reasoning text, never as an error.
pub(crate) async fn infer_or_fallback(
    reasoner: &dyn Reasoner,
    request: ReasonerRequest,
) -> RawClassification {
    let step = request.step;
    let trace_id = request.trace_id.clone();

    match reasoner.infer(request).await {
        Ok(record) => record,
        Err(error) => {
            tracing::warn!(
                step = step.label(),
                trace_id = %trace_id,
                %error,
                "reasoner call failed, degrading to technical-difficulty fallback"
            );
            RawClassification::reply_only(TECHNICAL_DIFFICULTY_REPLY)
                .with_reasoning(format!("Reasoner unavailable: {}", error))
        }
    }
}
