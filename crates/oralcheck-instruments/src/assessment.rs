//! Assessment aggregation and lifecycle.
//!
//! An [`Assessment`] collects up to seven item verdicts for one patient on one
//! date. It starts `InProgress`, accepts recorded (and re-recorded) items, and
//! is finalized exactly once. After that it is a read-only snapshot.
//!
//! The engine keeps no registry of assessments: every value is owned by the
//! caller, who is responsible for allowing only one live assessment per
//! patient.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use oralcheck_core::models::item::{ITEM_COUNT, ItemId};

use crate::error::ScoringError;
use crate::evaluator::{ItemVerdict, evaluate};
use crate::measurement::MeasurementReading;

/// Affected-item count at which oral hypofunction is diagnosed.
pub const DIAGNOSIS_THRESHOLD: u8 = 3;

pub fn diagnosis_for(affected_count: u8) -> bool {
    affected_count >= DIAGNOSIS_THRESHOLD
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LifecycleState {
    InProgress,
    Finalized,
}

impl LifecycleState {
    pub fn key(self) -> &'static str {
        match self {
            LifecycleState::InProgress => "in_progress",
            LifecycleState::Finalized => "finalized",
        }
    }
}

/// Recorded items out of the full screening, for progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Progress {
    pub recorded: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> u8 {
        ((self.recorded * 100) / self.total.max(1)) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.recorded >= self.total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Assessment {
    id: Uuid,
    patient_id: String,
    assessment_date: Date,
    state: LifecycleState,
    verdicts: BTreeMap<ItemId, ItemVerdict>,
    affected_count: u8,
    diagnosis: bool,
    finalized_at: Option<jiff::Timestamp>,
}

impl Assessment {
    /// Begin a new assessment for `patient_id`.
    pub fn start(patient_id: &str, assessment_date: Date) -> Result<Self, ScoringError> {
        let patient_id = patient_id.trim();
        if patient_id.is_empty() {
            return Err(ScoringError::NoPatientSelected);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            patient_id: patient_id.to_string(),
            assessment_date,
            state: LifecycleState::InProgress,
            verdicts: BTreeMap::new(),
            affected_count: 0,
            diagnosis: false,
            finalized_at: None,
        })
    }

    /// Evaluate `reading` and store it as the verdict for `item`, replacing
    /// any earlier verdict for the same item.
    pub fn record_item(
        &mut self,
        item: ItemId,
        reading: &MeasurementReading,
    ) -> Result<ItemVerdict, ScoringError> {
        if self.state == LifecycleState::Finalized {
            return Err(ScoringError::AssessmentAlreadyFinalized);
        }

        let verdict = evaluate(item, reading)?;
        self.verdicts.insert(item, verdict.clone());
        self.recount();
        Ok(verdict)
    }

    /// Lock the assessment. Calling again on a finalized assessment is a no-op.
    pub fn finalize(&mut self, at: jiff::Timestamp) -> &Self {
        if self.state == LifecycleState::InProgress {
            self.recount();
            self.state = LifecycleState::Finalized;
            self.finalized_at = Some(at);
        }
        self
    }

    fn recount(&mut self) {
        let affected = self.verdicts.values().filter(|v| v.affected).count();
        // at most one verdict per item, so this fits
        self.affected_count = affected as u8;
        self.diagnosis = diagnosis_for(self.affected_count);
    }

    pub fn progress(&self) -> Progress {
        Progress {
            recorded: self.verdicts.len(),
            total: ITEM_COUNT,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn assessment_date(&self) -> Date {
        self.assessment_date
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_finalized(&self) -> bool {
        self.state == LifecycleState::Finalized
    }

    pub fn finalized_at(&self) -> Option<jiff::Timestamp> {
        self.finalized_at
    }

    pub fn verdict(&self, item: ItemId) -> Option<&ItemVerdict> {
        self.verdicts.get(&item)
    }

    /// Recorded verdicts in item order.
    pub fn verdicts(&self) -> impl Iterator<Item = &ItemVerdict> {
        self.verdicts.values()
    }

    pub fn affected_items(&self) -> Vec<ItemId> {
        self.verdicts
            .values()
            .filter(|v| v.affected)
            .map(|v| v.item)
            .collect()
    }

    pub fn affected_count(&self) -> u8 {
        self.affected_count
    }

    pub fn diagnosis(&self) -> bool {
        self.diagnosis
    }
}
