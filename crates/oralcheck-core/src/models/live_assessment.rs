use jiff::SignedDuration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How long a claim may exist without its assessment before another start
/// may take it over.
pub const CLAIM_TIMEOUT: SignedDuration = SignedDuration::from_secs(60);

/// A patient's claim on their single in-progress assessment.
///
/// Stored under one key per patient and written only if absent, so of two
/// concurrent starts exactly one wins. Removed when the assessment is
/// finalized or the patient is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveAssessment {
    pub patient_id: Uuid,
    pub assessment_id: Uuid,
    pub claimed_at: jiff::Timestamp,
}

impl LiveAssessment {
    pub fn claim(patient_id: Uuid, assessment_id: Uuid, now: jiff::Timestamp) -> Self {
        Self {
            patient_id,
            assessment_id,
            claimed_at: now,
        }
    }

    /// Whether the claim no longer guards an open assessment.
    ///
    /// `holder_finalized` is the finalized flag of the claimed assessment, or
    /// `None` when it was never written. A missing assessment only counts as
    /// abandoned after [`CLAIM_TIMEOUT`], since its start may still be running.
    pub fn is_stale(&self, holder_finalized: Option<bool>, now: jiff::Timestamp) -> bool {
        match holder_finalized {
            Some(finalized) => finalized,
            None => now.duration_since(self.claimed_at) > CLAIM_TIMEOUT,
        }
    }
}
