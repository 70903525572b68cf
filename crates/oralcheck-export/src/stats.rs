use std::collections::HashSet;

use serde::Serialize;

use oralcheck_core::models::patient::{Patient, PatientStatus};
use oralcheck_instruments::assessment::Assessment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_patients: usize,
    pub total_assessments: usize,
    pub diagnosed_patients: usize,
    pub normal_patients: usize,
}

/// Clinic-wide counts. A patient is diagnosed if any finalized assessment of
/// theirs carries the diagnosis; everyone else counts as normal.
pub fn compute(patients: &[Patient], assessments: &[Assessment]) -> Statistics {
    let diagnosed: HashSet<&str> = assessments
        .iter()
        .filter(|a| a.is_finalized() && a.diagnosis())
        .map(Assessment::patient_id)
        .collect();

    let diagnosed_patients = patients
        .iter()
        .filter(|p| diagnosed.contains(p.id.to_string().as_str()))
        .count();

    Statistics {
        total_patients: patients.len(),
        total_assessments: assessments.len(),
        diagnosed_patients,
        normal_patients: patients.len() - diagnosed_patients,
    }
}

/// Most recent finalized assessment by assessment date, then finalize time.
pub fn latest_finalized(assessments: &[Assessment]) -> Option<&Assessment> {
    assessments
        .iter()
        .filter(|a| a.is_finalized())
        .max_by_key(|a| (a.assessment_date(), a.finalized_at()))
}

pub fn patient_status(assessments: &[Assessment]) -> PatientStatus {
    PatientStatus::from_latest_diagnosis(latest_finalized(assessments).map(Assessment::diagnosis))
}
