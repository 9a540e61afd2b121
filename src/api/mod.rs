/// HTTP API Layer
///
/// REST endpoints in front of the submission pipelines:
/// - One-shot and scheduled import submission
/// - Per-organization configuration view
/// - Error to status mapping

pub mod configuration;
pub mod error;
pub mod jobs;

use crate::submission::SubmissionOrchestrator;
use axum::Router;
use std::sync::Arc;

pub use error::ApiError;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SubmissionOrchestrator>,
}

/// All API routes, state still to be provided
pub fn create_api_routes() -> Router<AppState> {
    jobs::create_job_routes().merge(configuration::create_configuration_routes())
}
