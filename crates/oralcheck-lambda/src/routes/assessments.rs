use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oralcheck_core::models::directive::Directive;
use oralcheck_core::models::item::ItemId;
use oralcheck_core::models::live_assessment::LiveAssessment;
use oralcheck_core::models::management_plan::ManagementPlan;
use oralcheck_core::s3_keys;
use oralcheck_export::render::render_report;
use oralcheck_instruments::assessment::{Assessment, Progress};
use oralcheck_instruments::error::ScoringError;
use oralcheck_instruments::evaluator::ItemVerdict;
use oralcheck_instruments::get_instrument;
use oralcheck_instruments::measurement::MeasurementReading;
use oralcheck_instruments::plan::derive_defaults;
use oralcheck_instruments::scoring::ScoreEntry;
use oralcheck_storage::error::StorageError;
use oralcheck_storage::records;

use crate::error::ApiError;
use crate::routes::patients::load_patient;
use crate::state::AppState;

/// Load an assessment with its ETag, mapping a missing object to 404.
pub(crate) async fn load_assessment(
    state: &AppState,
    patient_id: Uuid,
    id: Uuid,
) -> Result<(Assessment, String), ApiError> {
    records::load(&state.store, &s3_keys::assessment(patient_id, id))
        .await
        .map_err(|e| match e {
            StorageError::NotFound { .. } => ApiError::NotFound(format!("assessment not found: {id}")),
            other => other.into(),
        })
}

pub(crate) async fn patient_assessments(
    state: &AppState,
    patient_id: Uuid,
) -> Result<Vec<Assessment>, ApiError> {
    Ok(records::load_all(&state.store, &s3_keys::assessments_prefix(patient_id)).await?)
}

/// Body of a start request; the date defaults to today.
#[derive(Debug, Default, Deserialize)]
pub struct StartAssessment {
    pub assessment_date: Option<Date>,
}

/// Take the patient's in-progress claim for `claim.assessment_id`.
///
/// An existing claim is replaced only when it is stale, and only if it is
/// unchanged since it was read.
async fn claim_live_assessment(state: &AppState, claim: &LiveAssessment) -> Result<(), ApiError> {
    let key = s3_keys::live_assessment(claim.patient_id);
    match records::create(&state.store, &key, claim).await {
        Ok(_) => return Ok(()),
        Err(StorageError::AlreadyExists { .. }) => {}
        Err(e) => return Err(e.into()),
    }

    let (held, etag): (LiveAssessment, String) = records::load(&state.store, &key)
        .await
        .map_err(|e| match e {
            StorageError::NotFound { .. } => ApiError::Conflict(
                "the in-progress assessment changed while starting; retry".to_string(),
            ),
            other => other.into(),
        })?;

    let holder_key = s3_keys::assessment(held.patient_id, held.assessment_id);
    let holder_finalized = match records::load::<Assessment>(&state.store, &holder_key).await {
        Ok((holder, _)) => Some(holder.is_finalized()),
        Err(StorageError::NotFound { .. }) => None,
        Err(e) => return Err(e.into()),
    };
    if !held.is_stale(holder_finalized, claim.claimed_at) {
        return Err(ApiError::Conflict(format!(
            "assessment {} is still in progress for this patient",
            held.assessment_id
        )));
    }

    records::save_if_match(&state.store, &key, claim, &etag)
        .await
        .map_err(|e| match e {
            StorageError::PreconditionFailed { .. } => ApiError::Conflict(
                "another assessment was started for this patient".to_string(),
            ),
            other => other.into(),
        })?;
    tracing::info!(
        patient_id = %claim.patient_id,
        stale_assessment_id = %held.assessment_id,
        "replaced stale assessment claim"
    );
    Ok(())
}

async fn release_claim(state: &AppState, patient_id: Uuid, assessment_id: Uuid) {
    if let Err(e) = records::release_live_assessment(&state.store, patient_id, assessment_id).await
    {
        tracing::warn!(
            %patient_id,
            %assessment_id,
            error = %e,
            "failed to release assessment claim"
        );
    }
}

/// Start a new assessment. A patient may have only one in progress at a time.
pub async fn start_assessment(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
    request: Option<Json<StartAssessment>>,
) -> Result<Json<Assessment>, ApiError> {
    let (patient, _) = load_patient(&state, patient_id).await?;

    if let Some(live) = patient_assessments(&state, patient_id)
        .await?
        .into_iter()
        .find(|a| !a.is_finalized())
    {
        return Err(ApiError::Conflict(format!(
            "assessment {} is still in progress for this patient",
            live.id()
        )));
    }

    let request = request.map(|Json(body)| body).unwrap_or_default();
    let date = request
        .assessment_date
        .unwrap_or_else(|| jiff::Zoned::now().date());
    let assessment = Assessment::start(&patient.id.to_string(), date)?;

    let claim = LiveAssessment::claim(patient_id, assessment.id(), jiff::Timestamp::now());
    claim_live_assessment(&state, &claim).await?;

    if let Err(e) = records::create(
        &state.store,
        &s3_keys::assessment(patient_id, assessment.id()),
        &assessment,
    )
    .await
    {
        release_claim(&state, patient_id, assessment.id()).await;
        return Err(e.into());
    }
    tracing::info!(%patient_id, assessment_id = %assessment.id(), "assessment started");
    Ok(Json(assessment))
}

pub async fn list_assessments(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<Assessment>>, ApiError> {
    load_patient(&state, patient_id).await?;
    let mut assessments = patient_assessments(&state, patient_id).await?;
    assessments.sort_by_key(|a| std::cmp::Reverse((a.assessment_date(), a.finalized_at())));
    Ok(Json(assessments))
}

pub async fn get_assessment(
    State(state): State<AppState>,
    Path((patient_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Assessment>, ApiError> {
    let (assessment, _) = load_assessment(&state, patient_id, id).await?;
    Ok(Json(assessment))
}

/// Either a finished reading, or per-question scores for an instrument that
/// produces one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ItemInput {
    Scores {
        instrument: String,
        scores: Vec<ScoreEntry>,
    },
    Reading(MeasurementReading),
}

impl ItemInput {
    fn into_reading(self) -> Result<MeasurementReading, ScoringError> {
        match self {
            ItemInput::Reading(reading) => Ok(reading),
            ItemInput::Scores { instrument, scores } => {
                let instrument = get_instrument(&instrument)
                    .ok_or(ScoringError::UnknownInstrument(instrument))?;
                instrument.build_reading(&scores)
            }
        }
    }
}

#[derive(Serialize)]
pub struct RecordedItem {
    verdict: ItemVerdict,
    progress: Progress,
    affected_count: u8,
    diagnosis: bool,
}

/// Record (or re-record) one item's measurement.
pub async fn record_item(
    State(state): State<AppState>,
    Path((patient_id, id, item)): Path<(Uuid, Uuid, ItemId)>,
    Json(input): Json<ItemInput>,
) -> Result<Json<RecordedItem>, ApiError> {
    let (mut assessment, etag) = load_assessment(&state, patient_id, id).await?;
    let reading = input.into_reading()?;
    let verdict = assessment.record_item(item, &reading)?;

    records::save_if_match(
        &state.store,
        &s3_keys::assessment(patient_id, id),
        &assessment,
        &etag,
    )
    .await?;
    tracing::info!(
        assessment_id = %id,
        item = %item,
        method = %verdict.method,
        affected = verdict.affected,
        "item recorded"
    );

    Ok(Json(RecordedItem {
        verdict,
        progress: assessment.progress(),
        affected_count: assessment.affected_count(),
        diagnosis: assessment.diagnosis(),
    }))
}

/// Lock the assessment. Finalizing an already-finalized assessment returns it
/// unchanged.
pub async fn finalize_assessment(
    State(state): State<AppState>,
    Path((patient_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Assessment>, ApiError> {
    let (mut assessment, etag) = load_assessment(&state, patient_id, id).await?;
    if assessment.is_finalized() {
        release_claim(&state, patient_id, id).await;
        return Ok(Json(assessment));
    }

    assessment.finalize(jiff::Timestamp::now());
    records::save_if_match(
        &state.store,
        &s3_keys::assessment(patient_id, id),
        &assessment,
        &etag,
    )
    .await?;
    release_claim(&state, patient_id, id).await;
    tracing::info!(
        assessment_id = %id,
        recorded = assessment.progress().recorded,
        affected_count = assessment.affected_count(),
        diagnosis = assessment.diagnosis(),
        "assessment finalized"
    );
    Ok(Json(assessment))
}

/// Default care-plan directives for a finalized assessment.
pub async fn plan_defaults(
    State(state): State<AppState>,
    Path((patient_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BTreeMap<ItemId, Directive>>, ApiError> {
    let (assessment, _) = load_assessment(&state, patient_id, id).await?;
    Ok(Json(derive_defaults(&assessment)?))
}

/// Printable text report, with the newest plan made from this assessment.
pub async fn assessment_report(
    State(state): State<AppState>,
    Path((patient_id, id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let (patient, _) = load_patient(&state, patient_id).await?;
    let (assessment, _) = load_assessment(&state, patient_id, id).await?;

    let plans: Vec<ManagementPlan> =
        records::load_all(&state.store, &s3_keys::plans_prefix(patient_id)).await?;
    let plan = plans
        .iter()
        .filter(|p| p.assessment_id == id)
        .max_by_key(|p| (p.plan_date, p.created_at));

    let report = render_report(&patient, &assessment, plan)?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], report))
}
