use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use oralcheck_core::models::management_plan::{ManagementPlan, NewManagementPlan};
use oralcheck_core::s3_keys;
use oralcheck_instruments::plan::derive_defaults;
use oralcheck_storage::records;

use crate::error::ApiError;
use crate::routes::assessments::load_assessment;
use crate::routes::patients::load_patient;
use crate::state::AppState;

/// Create a plan from a finalized assessment's defaults plus the clinician's
/// per-item overrides.
pub async fn create_plan(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
    Json(input): Json<NewManagementPlan>,
) -> Result<Json<ManagementPlan>, ApiError> {
    load_patient(&state, patient_id).await?;
    let (assessment, _) = load_assessment(&state, patient_id, input.assessment_id).await?;
    let defaults = derive_defaults(&assessment)?;

    let mut plan = ManagementPlan::from_defaults(
        patient_id,
        assessment.id(),
        input.plan_date,
        defaults,
        jiff::Timestamp::now(),
    );
    plan.apply_overrides(&input.overrides);
    plan.notes = input.notes.filter(|n| !n.trim().is_empty());

    records::create(&state.store, &s3_keys::plan(patient_id, plan.id), &plan).await?;
    tracing::info!(
        %patient_id,
        plan_id = %plan.id,
        overrides = input.overrides.len(),
        "management plan created"
    );
    Ok(Json(plan))
}

/// Plans for a patient, newest first.
pub async fn list_plans(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<ManagementPlan>>, ApiError> {
    load_patient(&state, patient_id).await?;
    let mut plans: Vec<ManagementPlan> =
        records::load_all(&state.store, &s3_keys::plans_prefix(patient_id)).await?;
    plans.sort_by_key(|p| std::cmp::Reverse((p.plan_date, p.created_at)));
    Ok(Json(plans))
}
