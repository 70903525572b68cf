//! Whole-clinic JSON backup and patient import.

use serde::{Deserialize, Serialize};

use oralcheck_core::models::general_condition::GeneralCondition;
use oralcheck_core::models::management_plan::ManagementPlan;
use oralcheck_core::models::patient::{DuplicateReason, NewPatient, Patient};
use oralcheck_core::models::progress_record::ProgressRecord;
use oralcheck_instruments::assessment::Assessment;

use crate::error::ExportError;

pub const BUNDLE_VERSION: &str = "oralcheck-1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataBundle {
    pub patients: Vec<Patient>,
    pub assessments: Vec<Assessment>,
    pub general_conditions: Vec<GeneralCondition>,
    pub management_plans: Vec<ManagementPlan>,
    pub progress_records: Vec<ProgressRecord>,
    pub export_date: jiff::Timestamp,
    pub version: String,
}

impl DataBundle {
    pub fn new(
        patients: Vec<Patient>,
        assessments: Vec<Assessment>,
        general_conditions: Vec<GeneralCondition>,
        management_plans: Vec<ManagementPlan>,
        progress_records: Vec<ProgressRecord>,
        export_date: jiff::Timestamp,
    ) -> Self {
        Self {
            patients,
            assessments,
            general_conditions,
            management_plans,
            progress_records,
            export_date,
            version: BUNDLE_VERSION.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A patient left out of an import because it collides with a known one.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedPatient {
    pub chart_number: String,
    pub name: String,
    pub reason: DuplicateReason,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportOutcome {
    pub patients: Vec<Patient>,
    pub skipped: Vec<SkippedPatient>,
}

/// Read the `patients` array of an import document.
///
/// Source ids and timestamps are discarded; every accepted patient gets a
/// fresh id and `now` as creation time. Entries colliding with `existing`,
/// or with an earlier entry of the same document, are skipped. Only patients
/// are imported; other arrays in the document are ignored.
pub fn parse_import(
    json: &str,
    existing: &[Patient],
    now: jiff::Timestamp,
) -> Result<ImportOutcome, ExportError> {
    let document: serde_json::Value = serde_json::from_str(json)?;
    let entries = document
        .get("patients")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| ExportError::InvalidImport("missing patients array".to_string()))?;

    let mut outcome = ImportOutcome::default();
    for (index, entry) in entries.iter().enumerate() {
        let candidate: NewPatient = serde_json::from_value(entry.clone())
            .map_err(|e| ExportError::InvalidImport(format!("patient {}: {e}", index + 1)))?;

        let duplicate = existing
            .iter()
            .chain(&outcome.patients)
            .find_map(|known| known.duplicate_of(&candidate));
        if let Some(reason) = duplicate {
            tracing::warn!(chart_number = %candidate.chart_number, ?reason, "import skipped duplicate");
            outcome.skipped.push(SkippedPatient {
                chart_number: candidate.chart_number,
                name: candidate.name,
                reason,
            });
            continue;
        }

        let patient = candidate
            .into_patient(now)
            .map_err(|e| ExportError::InvalidImport(format!("patient {}: {e}", index + 1)))?;
        outcome.patients.push(patient);
    }

    tracing::info!(
        imported = outcome.patients.len(),
        skipped = outcome.skipped.len(),
        "import parsed"
    );
    Ok(outcome)
}
