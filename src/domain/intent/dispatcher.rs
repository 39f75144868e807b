//! Priority dispatch over a normalized category set.
//!
//! Exactly one next branch is selected using a fixed precedence: medical
//! safety beats time-sensitive scheduling, which beats commercial intents,
//! which beat informational ones. Categories outside the table terminate
//! the flow with no branch.

use serde::{Deserialize, Serialize};

use super::IntentCategory;

/// The processing branch a conversation is routed to next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteBranch {
    /// Clinical triage; always wins.
    Medical,
    /// Booking, rescheduling, cancellation.
    Scheduling,
    /// Commercial follow-up and conversion.
    Sales,
    /// Procedure questions and clinic logistics.
    Faq,
}

impl RouteBranch {
    /// Short label for logs and response payloads.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Medical => "medical",
            Self::Scheduling => "scheduling",
            Self::Sales => "sales",
            Self::Faq => "faq",
        }
    }
}

/// The precedence table. Order is the contract: first class with any member
/// present wins.
const PRIORITY_TABLE: &[(RouteBranch, &[IntentCategory])] = &[
    (RouteBranch::Medical, &[IntentCategory::MedicalAssessment]),
    (
        RouteBranch::Scheduling,
        &[
            IntentCategory::ServiceScheduling,
            IntentCategory::ServiceRescheduling,
            IntentCategory::ServiceCancellation,
        ],
    ),
    (
        RouteBranch::Sales,
        &[
            IntentCategory::AdConversion,
            IntentCategory::OrganicInquiry,
            IntentCategory::OfferConversion,
            IntentCategory::ReengagementRecovery,
        ],
    ),
    (
        RouteBranch::Faq,
        &[
            IntentCategory::ProcedureInquiry,
            IntentCategory::GeneralInfo,
        ],
    ),
];

/// Selects the single next branch for a normalized category set.
///
/// Returns `None` when no category maps to a branch (session management,
/// escalation and unclassified traffic terminate here; the full category
/// set still travels in the response payload).
pub fn dispatch(categories: &[IntentCategory]) -> Option<RouteBranch> {
    PRIORITY_TABLE
        .iter()
        .find(|(_, members)| members.iter().any(|m| categories.contains(m)))
        .map(|(branch, _)| *branch)
}
