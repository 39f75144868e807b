//! Stage transition validation.
//!
//! The reasoner proposes a stage and entities; this module decides what
//! actually happened. Each flow runs the same ordered correction cascade -
//! a pure function from proposal to validated state, where later rules
//! override earlier results. The rule order is a contract:
//!
//! 1. out-of-enum stage -> the flow's in-progress default
//! 2. date-time outside commitment stages -> discarded
//! 3. scheduled but the counterpart asked a question -> confirming, no date
//! 4. scheduled without a surviving date-time -> confirming
//! 5. proposing_time without open slots -> pitching
//! 6. attempt ceiling reached in an early stage -> terminal failure
//! 7. terminal stage <=> should_continue = false
//! 8. reception only: valid contact in a non-terminal stage -> success
//!
//! Validation never fails; irreconcilable input degrades to the safest
//! non-committal stage with entities absent.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::stage::{ReceptionStage, SchedulingStage};

/// Raw proposal for one reception-flow turn.
#[derive(Debug, Clone)]
pub struct ReceptionProposal<'a> {
    /// Proposed stage, free text; may be outside the closed set.
    pub stage: Option<&'a str>,
    /// Phone contact that survived extraction.
    pub contact: Option<String>,
    /// Person name that survived extraction.
    pub contact_name: Option<String>,
    /// Agent turns already sent.
    pub attempt_count: u32,
}

/// Authoritative outcome of a reception-flow turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceptionState {
    pub stage: ReceptionStage,
    pub contact: Option<String>,
    pub contact_name: Option<String>,
    pub should_continue: bool,
}

/// Raw proposal for one scheduling-flow turn.
#[derive(Debug, Clone)]
pub struct SchedulingProposal<'a> {
    /// Proposed stage, free text; may be outside the closed set.
    pub stage: Option<&'a str>,
    /// Meeting time that survived extraction.
    pub meeting_datetime: Option<NaiveDateTime>,
    /// Latest counterpart message, for the counter-proposal check.
    pub latest_message: Option<&'a str>,
    /// Agent turns already sent.
    pub attempt_count: u32,
    /// Whether any time slots are open.
    pub has_open_slots: bool,
}

/// Authoritative outcome of a scheduling-flow turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulingState {
    pub stage: SchedulingStage,
    pub meeting_datetime: Option<NaiveDateTime>,
    pub should_continue: bool,
}

impl SchedulingState {
    /// A meeting exists exactly when the stage is scheduled.
    pub fn meeting_confirmed(&self) -> bool {
        self.meeting_datetime.is_some()
    }
}

/// Validates a reception-flow proposal.
pub fn validate_reception(proposal: ReceptionProposal<'_>, max_attempts: u32) -> ReceptionState {
    // Rule 1: repair an out-of-enum stage to the in-progress default.
    let mut stage = proposal
        .stage
        .and_then(|s| s.parse::<ReceptionStage>().ok())
        .unwrap_or_else(ReceptionStage::in_progress);

    // Rule 6: too many attempts without leaving the early stages.
    if proposal.attempt_count >= max_attempts && stage.is_early() {
        stage = ReceptionStage::Failed;
    }

    // Rule 8: a valid contact settles any non-terminal stage.
    if proposal.contact.is_some() && !stage.is_terminal() {
        stage = ReceptionStage::Success;
    }

    // Rule 7: should_continue is false exactly on terminal stages.
    ReceptionState {
        stage,
        contact: proposal.contact,
        contact_name: proposal.contact_name,
        should_continue: !stage.is_terminal(),
    }
}

/// Validates a scheduling-flow proposal.
pub fn validate_scheduling(proposal: SchedulingProposal<'_>, max_attempts: u32) -> SchedulingState {
    // Rule 1: repair an out-of-enum stage to the in-progress default.
    let mut stage = proposal
        .stage
        .and_then(|s| s.parse::<SchedulingStage>().ok())
        .unwrap_or_else(SchedulingStage::in_progress);
    let mut datetime = proposal.meeting_datetime;

    // Rule 2: a date-time outside the commitment stages is a hallucination.
    if datetime.is_some() && !stage.allows_commitment() {
        datetime = None;
    }

    // Rule 3: a question after "scheduled" is a counter-proposal.
    if stage == SchedulingStage::Scheduled
        && proposal.latest_message.is_some_and(|m| m.contains('?'))
    {
        stage = SchedulingStage::Confirming;
        datetime = None;
    }

    // Rule 4: scheduled without a surviving date-time is not scheduled.
    if stage == SchedulingStage::Scheduled && datetime.is_none() {
        stage = SchedulingStage::Confirming;
    }

    // Rule 5: cannot propose times without open slots.
    if stage == SchedulingStage::ProposingTime && !proposal.has_open_slots {
        stage = SchedulingStage::Pitching;
    }

    // Rule 6: too many attempts without leaving the early stages.
    if proposal.attempt_count >= max_attempts && stage.is_early() {
        stage = SchedulingStage::Lost;
    }

    // The meeting_datetime <=> scheduled invariant: only the terminal
    // scheduled stage may carry a time downstream.
    if stage != SchedulingStage::Scheduled {
        datetime = None;
    }

    // Rule 7: should_continue is false exactly on terminal stages.
    SchedulingState {
        stage,
        meeting_datetime: datetime,
        should_continue: !stage.is_terminal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn meeting() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 3)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap()
    }

    fn scheduling(stage: Option<&str>) -> SchedulingProposal<'_> {
        SchedulingProposal {
            stage,
            meeting_datetime: None,
            latest_message: None,
            attempt_count: 0,
            has_open_slots: true,
        }
    }

    fn reception(stage: Option<&str>) -> ReceptionProposal<'_> {
        ReceptionProposal {
            stage,
            contact: None,
            contact_name: None,
            attempt_count: 0,
        }
    }

    mod rule_1_unknown_stage {
        use super::*;

        #[test]
        fn scheduling_defaults_to_pitching() {
            let state = validate_scheduling(scheduling(Some("negotiating hard")), 5);
            assert_eq!(state.stage, SchedulingStage::Pitching);
        }

        #[test]
        fn reception_defaults_to_requesting() {
            let state = validate_reception(reception(Some("chatting")), 5);
            assert_eq!(state.stage, ReceptionStage::Requesting);
        }

        #[test]
        fn missing_stage_also_defaults() {
            let state = validate_scheduling(scheduling(None), 5);
            assert_eq!(state.stage, SchedulingStage::Pitching);
        }

        #[test]
        fn stage_parse_tolerates_case_and_padding() {
            let state = validate_scheduling(scheduling(Some("  Proposing_Time ")), 5);
            assert_eq!(state.stage, SchedulingStage::ProposingTime);
        }
    }

    mod rule_2_hallucinated_datetime {
        use super::*;

        #[test]
        fn datetime_discarded_outside_commitment_stages() {
            let proposal = SchedulingProposal {
                meeting_datetime: Some(meeting()),
                ..scheduling(Some("pitching"))
            };
            let state = validate_scheduling(proposal, 5);

            assert_eq!(state.stage, SchedulingStage::Pitching);
            assert_eq!(state.meeting_datetime, None);
        }

        #[test]
        fn datetime_survives_at_scheduled() {
            let proposal = SchedulingProposal {
                meeting_datetime: Some(meeting()),
                ..scheduling(Some("scheduled"))
            };
            let state = validate_scheduling(proposal, 5);

            assert_eq!(state.stage, SchedulingStage::Scheduled);
            assert_eq!(state.meeting_datetime, Some(meeting()));
            assert!(state.meeting_confirmed());
        }
    }

    mod rule_3_counter_proposal {
        use super::*;

        #[test]
        fn question_downgrades_scheduled_to_confirming() {
            let proposal = SchedulingProposal {
                meeting_datetime: Some(meeting()),
                latest_message: Some("pode ser às 16h ao invés de 15h?"),
                ..scheduling(Some("scheduled"))
            };
            let state = validate_scheduling(proposal, 5);

            assert_eq!(state.stage, SchedulingStage::Confirming);
            assert_eq!(state.meeting_datetime, None);
            assert!(state.should_continue);
        }

        #[test]
        fn statement_keeps_scheduled() {
            let proposal = SchedulingProposal {
                meeting_datetime: Some(meeting()),
                latest_message: Some("fechado, até lá!"),
                ..scheduling(Some("scheduled"))
            };
            let state = validate_scheduling(proposal, 5);

            assert_eq!(state.stage, SchedulingStage::Scheduled);
        }
    }

    mod rule_4_scheduled_needs_datetime {
        use super::*;

        #[test]
        fn scheduled_without_datetime_downgrades() {
            let state = validate_scheduling(scheduling(Some("scheduled")), 5);

            assert_eq!(state.stage, SchedulingStage::Confirming);
            assert_eq!(state.meeting_datetime, None);
            assert!(state.should_continue);
        }
    }

    mod rule_5_no_slots {
        use super::*;

        #[test]
        fn proposing_time_without_slots_falls_back() {
            let proposal = SchedulingProposal {
                has_open_slots: false,
                ..scheduling(Some("proposing_time"))
            };
            let state = validate_scheduling(proposal, 5);

            assert_eq!(state.stage, SchedulingStage::Pitching);
        }

        #[test]
        fn proposing_time_with_slots_stands() {
            let state = validate_scheduling(scheduling(Some("proposing_time")), 5);
            assert_eq!(state.stage, SchedulingStage::ProposingTime);
        }
    }

    mod rule_6_attempt_ceiling {
        use super::*;

        #[test]
        fn six_attempts_at_pitching_forces_lost() {
            let proposal = SchedulingProposal {
                attempt_count: 6,
                ..scheduling(Some("pitching"))
            };
            let state = validate_scheduling(proposal, 5);

            assert_eq!(state.stage, SchedulingStage::Lost);
            assert!(!state.should_continue);
        }

        #[test]
        fn ceiling_hits_exactly_at_max() {
            let proposal = SchedulingProposal {
                attempt_count: 5,
                ..scheduling(Some("greeting"))
            };
            let state = validate_scheduling(proposal, 5);

            assert_eq!(state.stage, SchedulingStage::Lost);
        }

        #[test]
        fn late_stages_survive_the_ceiling() {
            let proposal = SchedulingProposal {
                attempt_count: 9,
                ..scheduling(Some("confirming"))
            };
            let state = validate_scheduling(proposal, 5);

            assert_eq!(state.stage, SchedulingStage::Confirming);
            assert!(state.should_continue);
        }

        #[test]
        fn reception_ceiling_forces_failed() {
            let proposal = ReceptionProposal {
                attempt_count: 5,
                ..reception(Some("opening"))
            };
            let state = validate_reception(proposal, 5);

            assert_eq!(state.stage, ReceptionStage::Failed);
            assert!(!state.should_continue);
        }
    }

    mod rule_7_terminal_stops {
        use super::*;

        #[test]
        fn lost_never_continues() {
            let state = validate_scheduling(scheduling(Some("lost")), 5);
            assert!(!state.should_continue);
        }

        #[test]
        fn failed_never_continues() {
            let state = validate_reception(reception(Some("failed")), 5);
            assert!(!state.should_continue);
        }

        #[test]
        fn non_terminal_always_continues() {
            let state = validate_scheduling(scheduling(Some("confirming")), 5);
            assert!(state.should_continue);
        }
    }

    mod rule_8_contact_wins {
        use super::*;

        #[test]
        fn contact_forces_success() {
            let proposal = ReceptionProposal {
                contact: Some("11987654321".to_string()),
                contact_name: Some("Dr. Carlos".to_string()),
                ..reception(Some("handling_objection"))
            };
            let state = validate_reception(proposal, 5);

            assert_eq!(state.stage, ReceptionStage::Success);
            assert_eq!(state.contact.as_deref(), Some("11987654321"));
            assert_eq!(state.contact_name.as_deref(), Some("Dr. Carlos"));
            assert!(!state.should_continue);
        }

        #[test]
        fn contact_does_not_resurrect_failed() {
            let proposal = ReceptionProposal {
                contact: Some("11987654321".to_string()),
                ..reception(Some("failed"))
            };
            let state = validate_reception(proposal, 5);

            assert_eq!(state.stage, ReceptionStage::Failed);
        }

        #[test]
        fn ceiling_applies_before_contact_rescue() {
            // Cascade order: rule 6 fires first, leaving a terminal stage
            // that rule 8 must respect.
            let proposal = ReceptionProposal {
                contact: Some("11987654321".to_string()),
                attempt_count: 7,
                ..reception(Some("requesting"))
            };
            let state = validate_reception(proposal, 5);

            assert_eq!(state.stage, ReceptionStage::Failed);
        }
    }

    mod invariants {
        use super::*;

        fn arb_stage() -> impl Strategy<Value = Option<String>> {
            prop_oneof![
                Just(None::<String>),
                ".{0,20}".prop_map(Some),
                prop_oneof![
                    Just("greeting"),
                    Just("pitching"),
                    Just("proposing_time"),
                    Just("confirming"),
                    Just("scheduled"),
                    Just("lost"),
                ]
                .prop_map(|s: &str| Some(s.to_string())),
            ]
        }

        proptest! {
            /// stage == scheduled <=> meeting_datetime present.
            #[test]
            fn scheduled_iff_datetime(
                stage in arb_stage(),
                has_datetime in proptest::bool::ANY,
                message in proptest::option::of(".{0,40}"),
                attempts in 0u32..10,
                slots in proptest::bool::ANY,
            ) {
                let proposal = SchedulingProposal {
                    stage: stage.as_deref(),
                    meeting_datetime: has_datetime.then(meeting),
                    latest_message: message.as_deref(),
                    attempt_count: attempts,
                    has_open_slots: slots,
                };
                let state = validate_scheduling(proposal, 5);

                prop_assert_eq!(
                    state.stage == SchedulingStage::Scheduled,
                    state.meeting_datetime.is_some()
                );
            }

            /// should_continue is false exactly on terminal stages.
            #[test]
            fn continue_iff_non_terminal(
                stage in arb_stage(),
                attempts in 0u32..10,
            ) {
                let state = validate_scheduling(
                    SchedulingProposal {
                        stage: stage.as_deref(),
                        meeting_datetime: None,
                        latest_message: None,
                        attempt_count: attempts,
                        has_open_slots: true,
                    },
                    5,
                );
                prop_assert_eq!(state.should_continue, !state.stage.is_terminal());
            }
        }
    }
}
