use std::collections::HashMap;

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use serde::Serialize;

use oralcheck_core::models::general_condition::GeneralCondition;
use oralcheck_core::models::management_plan::ManagementPlan;
use oralcheck_core::models::patient::Patient;
use oralcheck_core::models::progress_record::ProgressRecord;
use oralcheck_core::s3_keys;
use oralcheck_export::bundle::{DataBundle, SkippedPatient, parse_import};
use oralcheck_export::csv::assessments_to_csv;
use oralcheck_export::stats::{self, Statistics};
use oralcheck_instruments::assessment::Assessment;
use oralcheck_storage::records;

use crate::error::ApiError;
use crate::state::AppState;

async fn load_patients(state: &AppState) -> Result<Vec<Patient>, ApiError> {
    Ok(records::load_all(&state.store, s3_keys::PATIENTS_PREFIX).await?)
}

async fn load_assessments(state: &AppState) -> Result<Vec<Assessment>, ApiError> {
    Ok(records::load_all(&state.store, s3_keys::ASSESSMENTS_PREFIX).await?)
}

fn attachment(filename: &str) -> String {
    format!("attachment; filename=\"{filename}\"")
}

/// Full JSON backup of every record in the bucket.
pub async fn export_json(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let now = jiff::Timestamp::now();
    let general_conditions: Vec<GeneralCondition> =
        records::load_all(&state.store, s3_keys::CONDITIONS_PREFIX).await?;
    let management_plans: Vec<ManagementPlan> =
        records::load_all(&state.store, s3_keys::PLANS_PREFIX).await?;
    let progress_records: Vec<ProgressRecord> =
        records::load_all(&state.store, s3_keys::PROGRESS_PREFIX).await?;

    let bundle = DataBundle::new(
        load_patients(&state).await?,
        load_assessments(&state).await?,
        general_conditions,
        management_plans,
        progress_records,
        now,
    );
    let body = bundle.to_json()?;
    tracing::info!(patients = bundle.patients.len(), "json export");

    let filename = attachment(&format!("oralcheck-backup-{}.json", now.strftime("%Y%m%d")));
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, filename),
        ],
        body,
    ))
}

/// Every assessment as CSV, ordered by chart number then date.
pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let patients: HashMap<String, Patient> = load_patients(&state)
        .await?
        .into_iter()
        .map(|p| (p.id.to_string(), p))
        .collect();

    let mut rows: Vec<(Patient, Assessment)> = load_assessments(&state)
        .await?
        .into_iter()
        .filter_map(|a| patients.get(a.patient_id()).map(|p| (p.clone(), a)))
        .collect();
    rows.sort_by(|(pa, a), (pb, b)| {
        (&pa.chart_number, a.assessment_date()).cmp(&(&pb.chart_number, b.assessment_date()))
    });

    let body = assessments_to_csv(&rows)?;
    let filename = attachment(&format!(
        "oralcheck-assessments-{}.csv",
        jiff::Timestamp::now().strftime("%Y%m%d")
    ));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, filename),
        ],
        body,
    ))
}

#[derive(Serialize)]
pub struct ImportSummary {
    imported: usize,
    skipped: Vec<SkippedPatient>,
}

/// Import the patients of a JSON backup. Existing records are kept.
pub async fn import(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportSummary>, ApiError> {
    let existing = load_patients(&state).await?;
    let outcome = parse_import(&body, &existing, jiff::Timestamp::now())?;

    for patient in &outcome.patients {
        records::create(&state.store, &s3_keys::patient(patient.id), patient).await?;
    }
    tracing::info!(
        imported = outcome.patients.len(),
        skipped = outcome.skipped.len(),
        "patients imported"
    );

    Ok(Json(ImportSummary {
        imported: outcome.patients.len(),
        skipped: outcome.skipped,
    }))
}

pub async fn statistics(State(state): State<AppState>) -> Result<Json<Statistics>, ApiError> {
    let patients = load_patients(&state).await?;
    let assessments = load_assessments(&state).await?;
    Ok(Json(stats::compute(&patients, &assessments)))
}
