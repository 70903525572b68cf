use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// Lowest and highest value of a follow-up rating.
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 3;

/// Area rated at a follow-up visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RatingArea {
    Nutrition,
    Hygiene,
    Dryness,
    Bite,
    Lip,
    Tongue,
    Mastication,
    Swallowing,
}

/// Follow-up (management guidance) note for a patient.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProgressRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub record_date: Date,
    /// 1 = improved, 2 = unchanged, 3 = worsened.
    pub ratings: BTreeMap<RatingArea, u8>,
    pub findings: Option<String>,
    pub notes: Option<String>,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProgressRecord {
    pub record_date: Date,
    #[serde(default)]
    pub ratings: BTreeMap<RatingArea, u8>,
    #[serde(default)]
    pub findings: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewProgressRecord {
    pub fn into_record(self, patient_id: Uuid, now: jiff::Timestamp) -> Result<ProgressRecord, CoreError> {
        if let Some((area, value)) = self
            .ratings
            .iter()
            .find(|(_, v)| !(RATING_MIN..=RATING_MAX).contains(*v))
        {
            return Err(CoreError::InvalidValue {
                field: format!("ratings.{area:?}").to_lowercase(),
                reason: format!("{value} is outside [{RATING_MIN}, {RATING_MAX}]"),
            });
        }

        Ok(ProgressRecord {
            id: Uuid::new_v4(),
            patient_id,
            record_date: self.record_date,
            ratings: self.ratings,
            findings: self.findings.filter(|f| !f.trim().is_empty()),
            notes: self.notes,
            created_at: now,
        })
    }
}

impl ProgressRecord {
    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let sum: u32 = self.ratings.values().map(|v| u32::from(*v)).sum();
        Some(f64::from(sum) / self.ratings.len() as f64)
    }

    pub fn has_findings(&self) -> bool {
        self.findings.is_some()
    }
}
