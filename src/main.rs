/// Import scheduler service
///
/// Main entry point. Loads configuration from the environment and starts
/// the HTTP server:
/// - Import submission at /api/orgs/{org_id}/jobs/*
/// - Client configuration at /api/orgs/{org_id}/configuration
/// - Health check at /healthz

use sqoop_scheduler::{config::Config, server::start_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    start_server(config).await?;

    Ok(())
}
