//! The closed intent category enumeration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a counterpart's message is about.
///
/// This is the single canonical enumeration; both the normalizer and the
/// dispatcher validate against it. `Unclassified` is the guaranteed fallback
/// member: normalized category sets are never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentCategory {
    /// Greetings, introductions, first contact.
    SessionStart,
    /// Farewells and cycle closure.
    SessionClosure,
    /// Booking a new appointment.
    ServiceScheduling,
    /// Changing an existing appointment.
    ServiceRescheduling,
    /// Cancelling an existing appointment.
    ServiceCancellation,
    /// Health concerns, complications, symptoms, emergencies.
    MedicalAssessment,
    /// Technical questions about procedures, pain, recovery.
    ProcedureInquiry,
    /// Response to an external advertisement.
    AdConversion,
    /// Organic interest in services, pricing, catalog.
    OrganicInquiry,
    /// Response to an outbound campaign.
    OfferConversion,
    /// Response to a cold-lead reengagement effort.
    ReengagementRecovery,
    /// Logistics: address, hours, payment methods.
    GeneralInfo,
    /// A photo sent for visual analysis.
    ImageAssessment,
    /// Explicit request for a human agent.
    HumanEscalation,
    /// Fallback when nothing else applies.
    Unclassified,
}

/// Error returned when a tag is not a member of the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized intent category")]
pub struct UnknownCategory;

impl IntentCategory {
    /// All members, in declaration order.
    pub fn all() -> [Self; 15] {
        [
            Self::SessionStart,
            Self::SessionClosure,
            Self::ServiceScheduling,
            Self::ServiceRescheduling,
            Self::ServiceCancellation,
            Self::MedicalAssessment,
            Self::ProcedureInquiry,
            Self::AdConversion,
            Self::OrganicInquiry,
            Self::OfferConversion,
            Self::ReengagementRecovery,
            Self::GeneralInfo,
            Self::ImageAssessment,
            Self::HumanEscalation,
            Self::Unclassified,
        ]
    }

    /// The wire tag for this category.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::SessionStart => "SESSION_START",
            Self::SessionClosure => "SESSION_CLOSURE",
            Self::ServiceScheduling => "SERVICE_SCHEDULING",
            Self::ServiceRescheduling => "SERVICE_RESCHEDULING",
            Self::ServiceCancellation => "SERVICE_CANCELLATION",
            Self::MedicalAssessment => "MEDICAL_ASSESSMENT",
            Self::ProcedureInquiry => "PROCEDURE_INQUIRY",
            Self::AdConversion => "AD_CONVERSION",
            Self::OrganicInquiry => "ORGANIC_INQUIRY",
            Self::OfferConversion => "OFFER_CONVERSION",
            Self::ReengagementRecovery => "REENGAGEMENT_RECOVERY",
            Self::GeneralInfo => "GENERAL_INFO",
            Self::ImageAssessment => "IMAGE_ASSESSMENT",
            Self::HumanEscalation => "HUMAN_ESCALATION",
            Self::Unclassified => "UNCLASSIFIED",
        }
    }
}

impl std::fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl std::str::FromStr for IntentCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|category| category.as_tag() == s)
            .ok_or(UnknownCategory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_tags() {
        for category in IntentCategory::all() {
            let parsed: IntentCategory = category.as_tag().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn serializes_to_screaming_snake_case() {
        let json = serde_json::to_string(&IntentCategory::MedicalAssessment).unwrap();
        assert_eq!(json, "\"MEDICAL_ASSESSMENT\"");
    }

    #[test]
    fn deserializes_from_wire_tag() {
        let category: IntentCategory = serde_json::from_str("\"SERVICE_SCHEDULING\"").unwrap();
        assert_eq!(category, IntentCategory::ServiceScheduling);
    }

    #[test]
    fn rejects_unknown_tags() {
        assert!("SCHEDULING".parse::<IntentCategory>().is_err());
        assert!("medical_assessment".parse::<IntentCategory>().is_err());
        assert!("".parse::<IntentCategory>().is_err());
    }

    #[test]
    fn enumeration_has_fifteen_members() {
        assert_eq!(IntentCategory::all().len(), 15);
    }
}
