/// Server setup and initialization
///
/// Wires together the workspace provider, the Oozie client, the submission
/// orchestrator and the HTTP routes.

use crate::{
    api::{create_api_routes, AppState},
    config::Config,
    scheduler::{JobContext, OozieClient, SchedulerClient},
    submission::SubmissionOrchestrator,
    workspace::{LocalWorkspaceProvider, WorkspaceProvider},
};
use anyhow::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Router around an already assembled orchestrator
pub fn create_router(orchestrator: Arc<SubmissionOrchestrator>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .merge(create_api_routes().with_state(AppState { orchestrator }))
}

/// Create the main Axum application from configuration
pub async fn create_app(config: Config) -> Result<Router> {
    tracing::info!("📁 Ensuring workspace root exists: {}", config.workspace.root_dir);
    tokio::fs::create_dir_all(&config.workspace.root_dir)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create workspace root: {}", e))?;

    let workspaces: Arc<dyn WorkspaceProvider> =
        Arc::new(LocalWorkspaceProvider::new(&config.workspace.root_dir));

    tracing::info!("🌐 Oozie API at {}", config.oozie.api_url);
    let client: Arc<dyn SchedulerClient> = Arc::new(OozieClient::new(JobContext::from(&config.oozie)));

    tracing::info!(
        "🗄️ {} database engine(s) registered, minimum period {}s",
        config.databases.len(),
        config.schedule.minimum_frequency_seconds
    );
    let orchestrator = Arc::new(SubmissionOrchestrator::from_config(&config, workspaces, client));

    tracing::info!("✅ Application initialized successfully");
    Ok(create_router(orchestrator))
}

/// Start the HTTP server with the given configuration
pub async fn start_server(config: Config) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting import scheduler...");

    let app = create_app(config.clone()).await?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "ok"
}
