use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use oralcheck_storage::objects::ObjectStore;

mod config;
mod error;
mod middleware;
mod routes;
mod state;

use config::ServiceConfig;
use state::AppState;

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Reference data
        .route("/rules", get(routes::rules::list_rules))
        .route("/instruments", get(routes::instruments::list_instruments))
        .route(
            "/instruments/{id}",
            get(routes::instruments::get_instrument_detail),
        )
        // Patients and their records
        .route(
            "/patients",
            get(routes::patients::list_patients).post(routes::patients::create_patient),
        )
        .route(
            "/patients/{id}",
            get(routes::patients::get_patient)
                .put(routes::patients::update_patient)
                .delete(routes::patients::delete_patient),
        )
        .route(
            "/patients/{id}/assessments",
            get(routes::assessments::list_assessments)
                .post(routes::assessments::start_assessment),
        )
        .route(
            "/patients/{id}/plans",
            get(routes::plans::list_plans).post(routes::plans::create_plan),
        )
        .route(
            "/patients/{id}/progress",
            get(routes::progress::list_progress_records)
                .post(routes::progress::create_progress_record),
        )
        .route(
            "/patients/{id}/conditions",
            post(routes::conditions::create_condition),
        )
        .route(
            "/patients/{id}/conditions/latest",
            get(routes::conditions::latest_condition),
        )
        // Assessment lifecycle
        .route(
            "/assessments/{patient_id}/{id}",
            get(routes::assessments::get_assessment),
        )
        .route(
            "/assessments/{patient_id}/{id}/items/{item}",
            put(routes::assessments::record_item),
        )
        .route(
            "/assessments/{patient_id}/{id}/finalize",
            post(routes::assessments::finalize_assessment),
        )
        .route(
            "/assessments/{patient_id}/{id}/plan-defaults",
            get(routes::assessments::plan_defaults),
        )
        .route(
            "/assessments/{patient_id}/{id}/report",
            get(routes::assessments::assessment_report),
        )
        // Bulk data
        .route("/export/json", get(routes::export::export_json))
        .route("/export/csv", get(routes::export::export_csv))
        .route("/import", post(routes::export::import))
        .route("/statistics", get(routes::export::statistics))
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(axum_mw::from_fn(middleware::audit::audit_log)),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ServiceConfig::from_env();
    tracing::info!(bucket = %config.bucket, region = ?config.region, "starting oralcheck api");

    let client = oralcheck_storage::client::build_client().await;
    let state = AppState {
        store: ObjectStore::new(client, config.bucket),
    };

    lambda_http::run(router(state)).await.map_err(|e| eyre::eyre!(e))
}
