//! Caller-supplied flow contexts.
//!
//! Everything here is input: the caller owns persistence of history and
//! attempt counters between turns. The core creates nothing and mutates
//! nothing beyond the single response it returns.

use serde::{Deserialize, Serialize};

use super::turn::Turn;

/// Coarse status of an auxiliary workflow, used only as an input feature
/// for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStatus {
    #[default]
    Idle,
    InProgress,
    Completed,
}

impl FlowStatus {
    /// The wire label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

/// Context for the routing flow: classify one inbound patient message.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingContext {
    /// The message to classify.
    pub latest_message: String,
    /// Prior turns, oldest first.
    #[serde(default)]
    pub history: Vec<Turn>,
    /// Intake workflow status.
    #[serde(default)]
    pub intake_status: FlowStatus,
    /// Scheduling workflow status.
    #[serde(default)]
    pub schedule_status: FlowStatus,
    /// Rescheduling workflow status.
    #[serde(default)]
    pub reschedule_status: FlowStatus,
    /// Cancellation workflow status.
    #[serde(default)]
    pub cancel_status: FlowStatus,
}

/// Context for one reception-flow turn.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceptionContext {
    /// Clinic we are calling.
    pub clinic_name: String,
    /// Prior turns, oldest first.
    #[serde(default)]
    pub history: Vec<Turn>,
    /// Latest counterpart message; absent when the agent opens.
    pub latest_message: Option<String>,
    /// Local hour 0-23, for greeting selection.
    pub current_hour: u32,
    /// Agent turns already sent in this conversation.
    #[serde(default)]
    pub attempt_count: u32,
}

/// Context for one scheduling-flow turn.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingContext {
    /// Manager we are talking to (e.g. "Dr. Marcos").
    pub manager_name: String,
    /// Clinic the manager runs.
    pub clinic_name: String,
    /// Clinic specialty; generic health wording is used when absent.
    pub specialty: Option<String>,
    /// Prior turns, oldest first.
    #[serde(default)]
    pub history: Vec<Turn>,
    /// Latest counterpart message; absent when the agent opens.
    pub latest_message: Option<String>,
    /// Open slots in `YYYY-MM-DD HH:MM` form.
    #[serde(default)]
    pub available_slots: Vec<String>,
    /// Local hour 0-23, for greeting selection.
    pub current_hour: u32,
    /// Agent turns already sent in this conversation.
    #[serde(default)]
    pub attempt_count: u32,
}

/// Context for a reengagement run over a cold lead.
#[derive(Debug, Clone, Deserialize)]
pub struct ReengageContext {
    /// Lead's first name.
    pub lead_name: String,
    /// Where the lead originally came from.
    pub ad_source: String,
    /// Age, interests, pains - whatever profiling exists.
    pub profile: String,
    /// Prior turns, oldest first.
    #[serde(default)]
    pub history: Vec<Turn>,
}
