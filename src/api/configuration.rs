/// Client configuration endpoint

use crate::api::{error::ApiResult, AppState};
use crate::submission::ConfigurationView;
use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

pub fn create_configuration_routes() -> Router<AppState> {
    Router::new().route("/api/orgs/{org_id}/configuration", get(get_configuration))
}

/// GET /api/orgs/{org_id}/configuration
/// Returns: { "databases": [...], "timezones": [...], "organizationDirectory": "...", "minimumFrequencyInSeconds": 300 }
async fn get_configuration(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> ApiResult<Json<ConfigurationView>> {
    let view = state.orchestrator.configuration(&org_id.to_string()).await?;
    Ok(Json(view))
}
