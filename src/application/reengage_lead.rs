//! Reengagement flow: analyze a cold lead, pick a strategy, draft the
//! message, and review it in a bounded feedback loop.
//!
//! Four ordered reasoner steps. Only the generate step is re-run on
//! rejection; analysis and strategy selection happen once per run. The
//! loop is explicitly bounded by [`EngineLimits::max_revisions`].

use std::sync::Arc;

use uuid::Uuid;

use crate::config::EngineLimits;
use crate::domain::classification::RawClassification;
use crate::domain::conversation::{render_history, ReengageContext};
use crate::domain::intent::coerce_flag;
use crate::domain::pipeline::{PipelineState, ReviewVerdict};
use crate::ports::{Reasoner, ReasonerRequest, ReasonerStep};

use super::infer_or_fallback;

const ANALYZE_DIRECTIVE: &str = "Analyze the conversation history and the lead's profile to \
diagnose why the lead went silent and which emotional triggers apply. Put the diagnosis in \
the diagnosis field.";

const STRATEGY_DIRECTIVE: &str = "Given the diagnosis, choose the single best reengagement \
strategy: PROVA_SOCIAL, EDUCACIONAL, OFERTA_DIRETA or CURIOSIDADE. Put only the strategy \
name in the strategy field.";

const GENERATE_DIRECTIVE: &str = "Write a short, human, highly persuasive WhatsApp message \
for the lead. At most two or three short paragraphs, friend-to-friend tone, no hashtags, no \
stiff formalities. If fear is the diagnosed problem, mention comfort lightly. Put the message \
in the reply field.";

const REVIEW_DIRECTIVE: &str = "Review the drafted reengagement message. Your only job is to \
block messages that are aggressive, overly formal or medically wrong. If the message is \
friendly, short and addresses the lead by name, set approved to true - do not polish what is \
already good. Set approved to true or false and justify in the reasoning field.";

/// Outcome of one reengagement run.
#[derive(Debug, Clone)]
pub struct ReengagedLead {
    /// The final message, approved or best-effort.
    pub message: String,
    /// Diagnosis from the analysis step.
    pub diagnosis: String,
    /// Strategy selected for the draft.
    pub strategy: String,
    /// Whether the reviewer approved the final draft.
    pub approved: bool,
    /// Revision rounds consumed.
    pub revision_count: u32,
}

/// Handler for the reengagement flow.
pub struct ReengageLeadHandler {
    reasoner: Arc<dyn Reasoner>,
    limits: EngineLimits,
}

impl ReengageLeadHandler {
    /// Creates a handler calling the given reasoner.
    pub fn new(reasoner: Arc<dyn Reasoner>, limits: EngineLimits) -> Self {
        Self { reasoner, limits }
    }

    /// Runs the full analyze -> strategy -> generate -> review pipeline.
    /// Never fails, and always terminates within the revision ceiling.
    pub async fn handle(&self, context: ReengageContext) -> ReengagedLead {
        let trace_id = Uuid::new_v4().to_string();
        let mut state = PipelineState::new();

        state.diagnosis = Some(self.analyze(&context, &trace_id).await);
        state.strategy = Some(self.select_strategy(&state, &trace_id).await);
        state.draft = Some(self.generate(&context, &state, &trace_id).await);

        loop {
            let verdict = self.review(&state, &trace_id).await;
            state.record_verdict(verdict);

            if state.approved {
                break;
            }
            if !state.begin_revision(self.limits.max_revisions) {
                tracing::warn!(
                    trace_id = %trace_id,
                    revision_count = state.revision_count,
                    "revision ceiling reached, shipping last draft unapproved"
                );
                break;
            }

            state.draft = Some(self.generate(&context, &state, &trace_id).await);
        }

        tracing::info!(
            trace_id = %trace_id,
            approved = state.approved,
            revision_count = state.revision_count,
            "reengagement run finished"
        );

        ReengagedLead {
            message: state.draft.unwrap_or_default(),
            diagnosis: state.diagnosis.unwrap_or_default(),
            strategy: state.strategy.unwrap_or_default(),
            approved: state.approved,
            revision_count: state.revision_count,
        }
    }

    async fn analyze(&self, context: &ReengageContext, trace_id: &str) -> String {
        let request = ReasonerRequest::new(ReasonerStep::Analyze, ANALYZE_DIRECTIVE)
            .with_trace_id(trace_id)
            .with_input("lead_name", context.lead_name.clone())
            .with_input("ad_source", context.ad_source.clone())
            .with_input("profile", context.profile.clone())
            .with_input("history", render_history(&context.history));

        let record = infer_or_fallback(self.reasoner.as_ref(), request).await;
        primary_text(record)
    }

    async fn select_strategy(&self, state: &PipelineState, trace_id: &str) -> String {
        let request = ReasonerRequest::new(ReasonerStep::SelectStrategy, STRATEGY_DIRECTIVE)
            .with_trace_id(trace_id)
            .with_input("diagnosis", state.diagnosis.clone().unwrap_or_default());

        let record = infer_or_fallback(self.reasoner.as_ref(), request).await;
        record
            .strategy
            .or(record.reply)
            .unwrap_or_default()
            .trim()
            .to_string()
    }

    async fn generate(
        &self,
        context: &ReengageContext,
        state: &PipelineState,
        trace_id: &str,
    ) -> String {
        let mut request = ReasonerRequest::new(ReasonerStep::Generate, GENERATE_DIRECTIVE)
            .with_trace_id(trace_id)
            .with_input("lead_name", context.lead_name.clone())
            .with_input("diagnosis", state.diagnosis.clone().unwrap_or_default())
            .with_input("strategy", state.strategy.clone().unwrap_or_default());

        if let Some(feedback) = &state.feedback {
            request = request.with_input("reviewer_feedback", feedback.clone());
        }

        let record = infer_or_fallback(self.reasoner.as_ref(), request).await;
        record.reply.unwrap_or_default()
    }

    async fn review(&self, state: &PipelineState, trace_id: &str) -> ReviewVerdict {
        let request = ReasonerRequest::new(ReasonerStep::Review, REVIEW_DIRECTIVE)
            .with_trace_id(trace_id)
            .with_input("draft", state.draft.clone().unwrap_or_default())
            .with_input("diagnosis", state.diagnosis.clone().unwrap_or_default());

        let record = infer_or_fallback(self.reasoner.as_ref(), request).await;

        if coerce_flag(&record.approved, false) {
            ReviewVerdict::approved()
        } else {
            ReviewVerdict::rejected(record.reasoning.or(record.reply).unwrap_or_default())
        }
    }
}

/// Best text a loose record offers for a free-text step.
fn primary_text(record: RawClassification) -> String {
    record
        .diagnosis
        .or(record.reasoning)
        .or(record.reply)
        .unwrap_or_default()
}
