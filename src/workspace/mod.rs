/// Workspace layer
///
/// The workspace is the storage the workflow engine reads job artifacts
/// from. The submission pipeline only talks to it through the traits below;
/// a local directory tree implementation ships with the service.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub mod local;

pub use local::{LocalWorkspace, LocalWorkspaceProvider};

/// File name of the serialized workflow inside its directory
pub const WORKFLOW_FILE: &str = "workflow.xml";

/// File name of the serialized coordinator inside its directory
pub const COORDINATOR_FILE: &str = "coordinator.xml";

/// Storage of a single organization
///
/// Paths are opaque strings produced by the `resolve_*` methods; callers
/// only ever append file names to them.
#[async_trait]
pub trait Workspace: Send + Sync {
    async fn exists(&self, path: &str) -> Result<bool>;

    /// Creates a new file; fails if the path is already taken
    async fn create_file(&self, path: &str, bytes: &[u8]) -> Result<()>;

    /// Directory the workflow of `job_id` lives in
    fn resolve_workflow_dir(&self, job_id: &str, app_path: &str) -> String;

    /// Directory imported data lands in; `dir` overrides the per-job default
    fn resolve_target_dir(&self, job_id: &str, dir: &str) -> String;

    /// Writes `workflow.xml` into `dir` and returns its path
    async fn write_workflow_definition(&self, dir: &str, xml: &str) -> Result<String>;

    /// Writes `coordinator.xml` into `dir` and returns its path
    async fn write_coordinator_definition(&self, dir: &str, xml: &str) -> Result<String>;

    /// Root directory of the organization
    fn org_dir(&self) -> String;
}

/// Hands out the workspace of an organization
#[async_trait]
pub trait WorkspaceProvider: Send + Sync {
    async fn workspace(&self, org_id: &str) -> Result<Arc<dyn Workspace>>;
}

/// Parent directory of an artifact path
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(index) => &path[..index],
        None => "",
    }
}
