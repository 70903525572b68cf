use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use oralcheck_core::models::general_condition::{GeneralCondition, NewGeneralCondition};
use oralcheck_core::s3_keys;
use oralcheck_storage::records;

use crate::error::ApiError;
use crate::routes::patients::load_patient;
use crate::state::AppState;

pub async fn create_condition(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
    Json(input): Json<NewGeneralCondition>,
) -> Result<Json<GeneralCondition>, ApiError> {
    load_patient(&state, patient_id).await?;
    let condition = input.into_condition(patient_id, jiff::Timestamp::now())?;

    records::create(
        &state.store,
        &s3_keys::condition(patient_id, condition.id),
        &condition,
    )
    .await?;
    tracing::info!(%patient_id, condition_id = %condition.id, "general condition recorded");
    Ok(Json(condition))
}

/// Most recently recorded general condition.
pub async fn latest_condition(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<GeneralCondition>, ApiError> {
    load_patient(&state, patient_id).await?;
    let conditions: Vec<GeneralCondition> =
        records::load_all(&state.store, &s3_keys::conditions_prefix(patient_id)).await?;

    conditions
        .into_iter()
        .max_by_key(|c| (c.recorded_on, c.created_at))
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no general condition for patient {patient_id}")))
}
