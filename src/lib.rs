//! Clinic Relay - Output Reconciliation & Conversation State Engine
//!
//! This crate reconciles untrusted, free-form reasoner output into a
//! deterministic, auditable conversation state machine for clinic lead
//! outreach. Downstream systems (message delivery, calendar booking, lead
//! records) only ever act on the validated state it produces.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
