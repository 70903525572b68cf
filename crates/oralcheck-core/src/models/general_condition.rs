use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// Snapshot of a patient's general physical condition.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GeneralCondition {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub recorded_on: Date,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub bmi: Option<f64>,
    pub diseases: Vec<String>,
    pub medications: Option<String>,
    pub pneumonia_history: bool,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewGeneralCondition {
    pub recorded_on: Date,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub diseases: Vec<String>,
    #[serde(default)]
    pub medications: Option<String>,
    #[serde(default)]
    pub pneumonia_history: bool,
}

/// Body mass index rounded to one decimal place.
///
/// Returns `None` unless both height and weight are positive.
pub fn body_mass_index(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if !(height_cm > 0.0 && weight_kg > 0.0) {
        return None;
    }
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    Some((bmi * 10.0).round() / 10.0)
}

fn check_measurement(field: &str, value: Option<f64>) -> Result<(), CoreError> {
    match value {
        Some(v) if !(v.is_finite() && v > 0.0) => Err(CoreError::InvalidValue {
            field: field.to_string(),
            reason: format!("{v} is not a positive measurement"),
        }),
        _ => Ok(()),
    }
}

impl NewGeneralCondition {
    pub fn into_condition(
        self,
        patient_id: Uuid,
        now: jiff::Timestamp,
    ) -> Result<GeneralCondition, CoreError> {
        check_measurement("height_cm", self.height_cm)?;
        check_measurement("weight_kg", self.weight_kg)?;

        let bmi = match (self.height_cm, self.weight_kg) {
            (Some(h), Some(w)) => body_mass_index(h, w),
            _ => None,
        };
        Ok(GeneralCondition {
            id: Uuid::new_v4(),
            patient_id,
            recorded_on: self.recorded_on,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            bmi,
            diseases: self.diseases,
            medications: self.medications.filter(|m| !m.trim().is_empty()),
            pneumonia_history: self.pneumonia_history,
            created_at: now,
        })
    }
}
