//! The two closed conversation-stage enumerations.
//!
//! Stages describe where a multi-turn negotiation stands. Each flow owns
//! its own closed set; parsing is lenient about case and whitespace but
//! never invents members.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a proposed stage is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized conversation stage")]
pub struct UnknownStage;

/// Stage of the reception flow: getting the manager's contact past the
/// front desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceptionStage {
    /// First message confirming we reached the right clinic.
    Opening,
    /// Asking for the manager's contact.
    Requesting,
    /// The front desk raised an obstacle or a question.
    HandlingObjection,
    /// Contact obtained.
    Success,
    /// Gave up after repeated objections.
    Failed,
}

impl ReceptionStage {
    /// The non-terminal in-progress default for repaired proposals.
    pub fn in_progress() -> Self {
        Self::Requesting
    }

    /// Terminal stages end the conversation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }

    /// The two earliest non-terminal stages, where repeated attempts
    /// without progress force a terminal failure.
    pub fn is_early(&self) -> bool {
        matches!(self, Self::Opening | Self::Requesting)
    }

    /// The wire label for this stage.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::Requesting => "requesting",
            Self::HandlingObjection => "handling_objection",
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

impl std::str::FromStr for ReceptionStage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "opening" => Ok(Self::Opening),
            "requesting" => Ok(Self::Requesting),
            "handling_objection" => Ok(Self::HandlingObjection),
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            _ => Err(UnknownStage),
        }
    }
}

/// Stage of the scheduling flow: closing a meeting with the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingStage {
    /// Personal greeting, waiting for a response.
    Greeting,
    /// Delivering the pitch and call-to-action.
    Pitching,
    /// Offering concrete time slots.
    ProposingTime,
    /// Confirming a slot the counterpart leaned towards.
    Confirming,
    /// Meeting booked.
    Scheduled,
    /// Counterpart declined for good.
    Lost,
}

impl SchedulingStage {
    /// The non-terminal in-progress default for repaired proposals.
    pub fn in_progress() -> Self {
        Self::Pitching
    }

    /// Terminal stages end the conversation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Scheduled | Self::Lost)
    }

    /// The two earliest non-terminal stages, where repeated attempts
    /// without progress force a terminal failure.
    pub fn is_early(&self) -> bool {
        matches!(self, Self::Greeting | Self::Pitching)
    }

    /// Stages in which a concrete meeting time may legitimately appear.
    pub fn allows_commitment(&self) -> bool {
        matches!(self, Self::Confirming | Self::Scheduled)
    }

    /// The wire label for this stage.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Pitching => "pitching",
            Self::ProposingTime => "proposing_time",
            Self::Confirming => "confirming",
            Self::Scheduled => "scheduled",
            Self::Lost => "lost",
        }
    }
}

impl std::str::FromStr for SchedulingStage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "greeting" => Ok(Self::Greeting),
            "pitching" => Ok(Self::Pitching),
            "proposing_time" => Ok(Self::ProposingTime),
            "confirming" => Ok(Self::Confirming),
            "scheduled" => Ok(Self::Scheduled),
            "lost" => Ok(Self::Lost),
            _ => Err(UnknownStage),
        }
    }
}
