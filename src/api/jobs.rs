/// Import job submission endpoints

use crate::api::{error::ApiResult, AppState};
use crate::import::{ImportJob, ScheduledImportJob};
use crate::submission::JobHandle;
use axum::{
    extract::{Path, State},
    response::Json,
    routing::post,
    Router,
};
use uuid::Uuid;

pub fn create_job_routes() -> Router<AppState> {
    Router::new()
        .route("/api/orgs/{org_id}/jobs/import", post(submit_import))
        .route("/api/orgs/{org_id}/jobs/scheduled-import", post(submit_scheduled_import))
}

/// Run an import once
///
/// POST /api/orgs/{org_id}/jobs/import
/// Body: { "name": "...", "appPath": "...", "sqoopImport": { ... } }
async fn submit_import(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Json(job): Json<ImportJob>,
) -> ApiResult<Json<JobHandle>> {
    tracing::info!("📥 Import job '{}' requested by org {}", job.name, org_id);
    let handle = state
        .orchestrator
        .submit_one_shot(job, &org_id.to_string())
        .await?;
    Ok(Json(handle))
}

/// Run an import on a schedule
///
/// POST /api/orgs/{org_id}/jobs/scheduled-import
/// Body: { "name": "...", "appPath": "...", "sqoopImport": { ... }, "schedule": { ... } }
///
/// The minimum period is checked first and alone; the remaining schedule
/// rules are reported together by the pipeline.
async fn submit_scheduled_import(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Json(job): Json<ScheduledImportJob>,
) -> ApiResult<Json<JobHandle>> {
    tracing::info!("📥 Scheduled import job '{}' requested by org {}", job.name, org_id);
    state.orchestrator.check_frequency(&job.schedule)?;

    let handle = state
        .orchestrator
        .submit_recurring(job, &org_id.to_string())
        .await?;
    Ok(Json(handle))
}
