//! S3 key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of objects in the oralcheck S3 bucket. Every per-patient record
//! lives under a prefix containing the patient id so that deleting a patient
//! can remove everything with prefix deletes.

use uuid::Uuid;

pub const PATIENTS_PREFIX: &str = "patients/";
pub const ASSESSMENTS_PREFIX: &str = "assessments/";
pub const PLANS_PREFIX: &str = "plans/";
pub const PROGRESS_PREFIX: &str = "progress/";
pub const CONDITIONS_PREFIX: &str = "conditions/";
pub const LIVE_PREFIX: &str = "live/";

pub fn patient(id: Uuid) -> String {
    format!("{PATIENTS_PREFIX}{id}.json")
}

pub fn assessments_prefix(patient_id: Uuid) -> String {
    format!("{ASSESSMENTS_PREFIX}{patient_id}/")
}

pub fn assessment(patient_id: Uuid, id: Uuid) -> String {
    format!("{ASSESSMENTS_PREFIX}{patient_id}/{id}.json")
}

pub fn plans_prefix(patient_id: Uuid) -> String {
    format!("{PLANS_PREFIX}{patient_id}/")
}

pub fn plan(patient_id: Uuid, id: Uuid) -> String {
    format!("{PLANS_PREFIX}{patient_id}/{id}.json")
}

pub fn progress_prefix(patient_id: Uuid) -> String {
    format!("{PROGRESS_PREFIX}{patient_id}/")
}

pub fn progress_record(patient_id: Uuid, id: Uuid) -> String {
    format!("{PROGRESS_PREFIX}{patient_id}/{id}.json")
}

pub fn conditions_prefix(patient_id: Uuid) -> String {
    format!("{CONDITIONS_PREFIX}{patient_id}/")
}

pub fn condition(patient_id: Uuid, id: Uuid) -> String {
    format!("{CONDITIONS_PREFIX}{patient_id}/{id}.json")
}

/// Claim on the patient's in-progress assessment. Kept outside the
/// assessments prefix so listing assessments never decodes it.
pub fn live_assessment(patient_id: Uuid) -> String {
    format!("{LIVE_PREFIX}{patient_id}.json")
}

/// Every prefix holding records owned by a patient.
pub fn patient_record_prefixes(patient_id: Uuid) -> [String; 4] {
    [
        assessments_prefix(patient_id),
        plans_prefix(patient_id),
        progress_prefix(patient_id),
        conditions_prefix(patient_id),
    ]
}
