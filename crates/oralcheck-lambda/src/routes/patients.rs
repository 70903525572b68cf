use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oralcheck_core::models::patient::{NewPatient, Patient, PatientStatus};
use oralcheck_core::s3_keys;
use oralcheck_export::stats::patient_status;
use oralcheck_instruments::assessment::Assessment;
use oralcheck_storage::error::StorageError;
use oralcheck_storage::records;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PatientQuery {
    pub search: Option<String>,
    pub status: Option<PatientStatus>,
}

#[derive(Serialize)]
pub struct PatientSummary {
    #[serde(flatten)]
    patient: Patient,
    status: PatientStatus,
    age: Option<i16>,
}

/// Load a patient, mapping a missing object to 404.
pub(crate) async fn load_patient(
    state: &AppState,
    id: Uuid,
) -> Result<(Patient, String), ApiError> {
    records::load(&state.store, &s3_keys::patient(id))
        .await
        .map_err(|e| match e {
            StorageError::NotFound { .. } => ApiError::NotFound(format!("patient not found: {id}")),
            other => other.into(),
        })
}

async fn all_patients(state: &AppState) -> Result<Vec<Patient>, ApiError> {
    Ok(records::load_all(&state.store, s3_keys::PATIENTS_PREFIX).await?)
}

fn reject_duplicates<'a>(
    mut known: impl Iterator<Item = &'a Patient>,
    candidate: &NewPatient,
) -> Result<(), ApiError> {
    match known.find_map(|p| p.duplicate_of(candidate)) {
        Some(reason) => Err(ApiError::Conflict(reason.message().to_string())),
        None => Ok(()),
    }
}

pub async fn list_patients(
    State(state): State<AppState>,
    Query(query): Query<PatientQuery>,
) -> Result<Json<Vec<PatientSummary>>, ApiError> {
    let today = jiff::Zoned::now().date();
    let term = query.search.unwrap_or_default();

    let mut summaries = Vec::new();
    for patient in all_patients(&state).await? {
        if !patient.matches(&term) {
            continue;
        }
        let assessments: Vec<Assessment> =
            records::load_all(&state.store, &s3_keys::assessments_prefix(patient.id)).await?;
        let status = patient_status(&assessments);
        if query.status.is_some_and(|wanted| wanted != status) {
            continue;
        }
        summaries.push(PatientSummary {
            age: patient.age_on(today),
            status,
            patient,
        });
    }
    summaries.sort_by(|a, b| a.patient.chart_number.cmp(&b.patient.chart_number));

    Ok(Json(summaries))
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Patient>, ApiError> {
    let (patient, _) = load_patient(&state, id).await?;
    Ok(Json(patient))
}

pub async fn create_patient(
    State(state): State<AppState>,
    Json(input): Json<NewPatient>,
) -> Result<Json<Patient>, ApiError> {
    input.validate(jiff::Zoned::now().date())?;
    let existing = all_patients(&state).await?;
    reject_duplicates(existing.iter(), &input)?;

    let patient = input.into_patient(jiff::Timestamp::now())?;
    records::create(&state.store, &s3_keys::patient(patient.id), &patient).await?;
    tracing::info!(patient_id = %patient.id, "patient created");
    Ok(Json(patient))
}

pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<NewPatient>,
) -> Result<Json<Patient>, ApiError> {
    let (mut patient, etag) = load_patient(&state, id).await?;
    input.validate(jiff::Zoned::now().date())?;
    let existing = all_patients(&state).await?;
    reject_duplicates(existing.iter().filter(|p| p.id != id), &input)?;

    patient.apply_update(input, jiff::Timestamp::now())?;
    records::save_if_match(&state.store, &s3_keys::patient(id), &patient, &etag).await?;
    tracing::info!(patient_id = %id, "patient updated");
    Ok(Json(patient))
}

#[derive(Serialize)]
pub struct DeletedPatient {
    id: Uuid,
    removed_records: usize,
}

/// Delete a patient and every record filed under them.
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedPatient>, ApiError> {
    load_patient(&state, id).await?;
    let removed_records = records::delete_patient(&state.store, id).await?;
    Ok(Json(DeletedPatient {
        id,
        removed_records,
    }))
}
