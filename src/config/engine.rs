//! Reconciliation engine limits
//!
//! The fixed numeric contracts of the state machine, surfaced as
//! configuration so deployments can observe (not casually change) them.

use serde::Deserialize;

use super::error::ValidationError;

/// Engine limits
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EngineLimits {
    /// Agent turns before an unproductive conversation is forced terminal
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Rejected generate/review round-trips allowed in the review loop
    #[serde(default = "default_max_revisions")]
    pub max_revisions: u32,

    /// Digits required for an extracted phone contact to count
    #[serde(default = "default_min_phone_digits")]
    pub min_phone_digits: usize,
}

impl EngineLimits {
    /// Validate engine limits
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_attempts == 0 {
            return Err(ValidationError::InvalidMaxAttempts);
        }
        if self.max_revisions == 0 {
            return Err(ValidationError::InvalidMaxRevisions);
        }
        if !(6..=15).contains(&self.min_phone_digits) {
            return Err(ValidationError::InvalidPhoneDigits);
        }
        Ok(())
    }
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            max_revisions: default_max_revisions(),
            min_phone_digits: default_min_phone_digits(),
        }
    }
}

fn default_max_attempts() -> u32 {
    5
}

fn default_max_revisions() -> u32 {
    3
}

fn default_min_phone_digits() -> usize {
    10
}
