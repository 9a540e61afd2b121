/// Scheduler client layer
///
/// The workflow engine is reached through [`SchedulerClient`]; the Oozie
/// REST implementation and the per-deployment job context live here.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod context;
pub mod oozie;

pub use context::JobContext;
pub use oozie::OozieClient;

/// Identifier the engine assigned to a submitted job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineJobId(pub String);

impl fmt::Display for EngineJobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Submission capability of the workflow engine
#[async_trait]
pub trait SchedulerClient: Send + Sync {
    /// Starts a one-shot workflow stored under `app_path`
    async fn submit_workflow_job(&self, app_path: &str, target_dir: &str) -> Result<EngineJobId>;

    /// Starts a coordinator stored under `app_path`
    async fn submit_coordinated_job(&self, app_path: &str, target_dir: &str) -> Result<EngineJobId>;
}
