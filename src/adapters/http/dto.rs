//! HTTP DTOs for the flow endpoints.
//!
//! These types decouple the HTTP API from domain types. Requests reuse the
//! domain contexts directly (they are already plain inputs); responses are
//! flattened to the wire shapes downstream automations consume.

use serde::Serialize;

use crate::application::{ReceptionReply, ReengagedLead, RoutedMessage, SchedulingReply};
use crate::domain::extraction::to_iso;
use crate::domain::intent::IntentCategory;

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for the routing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RouteResponse {
    pub categories: Vec<IntentCategory>,
    pub routed_to: Option<String>,
    pub urgency_score: u8,
    pub confidence: f64,
    pub reasoning: String,
    pub messages: Vec<String>,
    pub processing_time_ms: f64,
}

impl RouteResponse {
    pub fn from_outcome(outcome: RoutedMessage, processing_time_ms: f64) -> Self {
        Self {
            categories: outcome.categories,
            routed_to: outcome.branch.map(|b| b.label().to_string()),
            urgency_score: outcome.urgency,
            confidence: outcome.confidence,
            reasoning: outcome.reasoning,
            messages: outcome.reply,
            processing_time_ms,
        }
    }
}

/// Response for the reception endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ReceptionResponse {
    pub messages: Vec<String>,
    pub conversation_stage: String,
    pub extracted_manager_contact: Option<String>,
    pub extracted_manager_name: Option<String>,
    pub should_send_message: bool,
    pub reasoning: String,
    pub processing_time_ms: f64,
}

impl ReceptionResponse {
    pub fn from_outcome(outcome: ReceptionReply, processing_time_ms: f64) -> Self {
        Self {
            messages: outcome.messages,
            conversation_stage: outcome.state.stage.label().to_string(),
            extracted_manager_contact: outcome.state.contact,
            extracted_manager_name: outcome.state.contact_name,
            should_send_message: outcome.state.should_continue,
            reasoning: outcome.reasoning,
            processing_time_ms,
        }
    }
}

/// Response for the scheduling endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SchedulingResponse {
    pub messages: Vec<String>,
    pub conversation_stage: String,
    pub meeting_datetime: Option<String>,
    pub meeting_confirmed: bool,
    pub should_send_message: bool,
    pub reasoning: String,
    pub processing_time_ms: f64,
}

impl SchedulingResponse {
    pub fn from_outcome(outcome: SchedulingReply, processing_time_ms: f64) -> Self {
        Self {
            messages: outcome.messages,
            conversation_stage: outcome.state.stage.label().to_string(),
            meeting_confirmed: outcome.state.meeting_confirmed(),
            meeting_datetime: outcome.state.meeting_datetime.map(|dt| to_iso(&dt)),
            should_send_message: outcome.state.should_continue,
            reasoning: outcome.reasoning,
            processing_time_ms,
        }
    }
}

/// Response for the reengagement endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ReengageResponse {
    pub message: String,
    pub diagnosis: String,
    pub strategy: String,
    pub approved: bool,
    pub revision_count: u32,
    pub processing_time_ms: f64,
}

impl ReengageResponse {
    pub fn from_outcome(outcome: ReengagedLead, processing_time_ms: f64) -> Self {
        Self {
            message: outcome.message,
            diagnosis: outcome.diagnosis,
            strategy: outcome.strategy,
            approved: outcome.approved,
            revision_count: outcome.revision_count,
            processing_time_ms,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub reasoner: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{ReceptionState, ReceptionStage};

    #[test]
    fn reception_response_flattens_state() {
        let outcome = ReceptionReply {
            messages: vec!["Obrigado!".to_string()],
            state: ReceptionState {
                stage: ReceptionStage::Success,
                contact: Some("11987654321".to_string()),
                contact_name: None,
                should_continue: false,
            },
            reasoning: "contact obtained".to_string(),
        };

        let response = ReceptionResponse::from_outcome(outcome, 12.5);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["conversation_stage"], "success");
        assert_eq!(json["extracted_manager_contact"], "11987654321");
        assert_eq!(json["should_send_message"], false);
        assert_eq!(json["processing_time_ms"], 12.5);
    }

    #[test]
    fn route_response_serializes_categories_as_wire_tags() {
        let outcome = RoutedMessage {
            categories: vec![IntentCategory::MedicalAssessment],
            branch: Some(crate::domain::intent::RouteBranch::Medical),
            urgency: 5,
            confidence: 0.9,
            reasoning: String::new(),
            reply: Vec::new(),
        };

        let response = RouteResponse::from_outcome(outcome, 3.0);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["categories"][0], "MEDICAL_ASSESSMENT");
        assert_eq!(json["routed_to"], "medical");
    }
}
