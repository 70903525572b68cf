use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use oralcheck_core::models::progress_record::{NewProgressRecord, ProgressRecord};
use oralcheck_core::s3_keys;
use oralcheck_storage::records;

use crate::error::ApiError;
use crate::routes::patients::load_patient;
use crate::state::AppState;

pub async fn create_progress_record(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
    Json(input): Json<NewProgressRecord>,
) -> Result<Json<ProgressRecord>, ApiError> {
    load_patient(&state, patient_id).await?;
    let record = input.into_record(patient_id, jiff::Timestamp::now())?;

    records::create(
        &state.store,
        &s3_keys::progress_record(patient_id, record.id),
        &record,
    )
    .await?;
    tracing::info!(%patient_id, record_id = %record.id, "progress record created");
    Ok(Json(record))
}

/// Progress records for a patient, newest first.
pub async fn list_progress_records(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<ProgressRecord>>, ApiError> {
    load_patient(&state, patient_id).await?;
    let mut progress: Vec<ProgressRecord> =
        records::load_all(&state.store, &s3_keys::progress_prefix(patient_id)).await?;
    progress.sort_by_key(|r| std::cmp::Reverse((r.record_date, r.created_at)));
    Ok(Json(progress))
}
